use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLineItem;

pub const DEFAULT_FLAT_SHIPPING_FEE: i64 = 99;
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 999;
pub const DEFAULT_COUPON_CODE: &str = "BOOKS50";
pub const DEFAULT_COUPON_RATE_PCT: i64 = 10;
pub const DEFAULT_COUPON_MAX_DISCOUNT: i64 = 500;

#[derive(Clone, Debug)]
pub struct CouponPolicy {
    pub code: SecretString,
    pub rate_pct: Decimal,
    pub max_discount: Decimal,
}

impl CouponPolicy {
    /// Codes match case-insensitively, ignoring surrounding whitespace.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.trim().eq_ignore_ascii_case(self.code.expose_secret().trim())
    }

    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.rate_pct / Decimal::ONE_HUNDRED).min(self.max_discount).round_dp(2)
    }
}

#[derive(Clone, Debug)]
pub struct PricingPolicy {
    pub flat_shipping_fee: Decimal,
    /// Shipping is free once the subtotal strictly exceeds this amount.
    pub free_shipping_threshold: Decimal,
    pub coupon: CouponPolicy,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            flat_shipping_fee: Decimal::from(DEFAULT_FLAT_SHIPPING_FEE),
            free_shipping_threshold: Decimal::from(DEFAULT_FREE_SHIPPING_THRESHOLD),
            coupon: CouponPolicy {
                code: SecretString::from(DEFAULT_COUPON_CODE.to_owned()),
                rate_pct: Decimal::from(DEFAULT_COUPON_RATE_PCT),
                max_discount: Decimal::from(DEFAULT_COUPON_MAX_DISCOUNT),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponOutcome {
    NotProvided,
    Applied,
    Invalid,
}

impl CouponOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub coupon: CouponOutcome,
    pub trace: Vec<PricingTraceStep>,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, cart: &[CartLineItem], coupon_code: Option<&str>) -> PricingResult;
}

#[derive(Clone, Debug, Default)]
pub struct DeterministicPricingEngine {
    policy: PricingPolicy,
}

impl DeterministicPricingEngine {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }
}

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, cart: &[CartLineItem], coupon_code: Option<&str>) -> PricingResult {
        price_cart_with_policy(cart, coupon_code, &self.policy)
    }
}

pub fn cart_subtotal(cart: &[CartLineItem]) -> Decimal {
    cart.iter().map(CartLineItem::line_total).sum()
}

/// Prices `cart` under the default storefront policy.
pub fn price(cart: &[CartLineItem], coupon_code: Option<&str>) -> PricingResult {
    price_cart_with_policy(cart, coupon_code, &PricingPolicy::default())
}

pub fn price_cart_with_policy(
    cart: &[CartLineItem],
    coupon_code: Option<&str>,
    policy: &PricingPolicy,
) -> PricingResult {
    let subtotal = cart_subtotal(cart);
    let mut trace = vec![PricingTraceStep {
        stage: "subtotal".to_string(),
        detail: "sum(effective_price * quantity)".to_string(),
        amount: subtotal,
    }];

    let shipping = if cart.is_empty() || subtotal > policy.free_shipping_threshold {
        Decimal::ZERO
    } else {
        policy.flat_shipping_fee
    };
    trace.push(PricingTraceStep {
        stage: "shipping".to_string(),
        detail: if cart.is_empty() {
            "nothing to ship".to_string()
        } else if shipping.is_zero() {
            format!("free above {}", policy.free_shipping_threshold)
        } else {
            format!("flat fee at or below {}", policy.free_shipping_threshold)
        },
        amount: shipping,
    });

    // Only an absent code means no coupon. A supplied blank code is invalid.
    let (coupon, discount) = match coupon_code {
        None => (CouponOutcome::NotProvided, Decimal::ZERO),
        Some(code) if policy.coupon.matches(code) => {
            (CouponOutcome::Applied, policy.coupon.discount_for(subtotal))
        }
        Some(_) => (CouponOutcome::Invalid, Decimal::ZERO),
    };
    trace.push(PricingTraceStep {
        stage: "coupon".to_string(),
        detail: match coupon {
            CouponOutcome::NotProvided => "no coupon".to_string(),
            CouponOutcome::Applied => format!(
                "{}% off up to {}",
                policy.coupon.rate_pct, policy.coupon.max_discount
            ),
            CouponOutcome::Invalid => "invalid coupon code".to_string(),
        },
        amount: discount,
    });

    let total = (subtotal + shipping - discount).max(Decimal::ZERO);
    trace.push(PricingTraceStep {
        stage: "total".to_string(),
        detail: "max(subtotal + shipping - discount, 0)".to_string(),
        amount: total,
    });

    PricingResult { subtotal, shipping, discount, total, coupon, trace }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use secrecy::SecretString;

    use super::{
        price, price_cart_with_policy, CouponOutcome, CouponPolicy, DeterministicPricingEngine,
        PricingEngine, PricingPolicy,
    };
    use crate::domain::book::{BookId, BookRecord, Genre};
    use crate::domain::cart::CartLineItem;

    fn line(id: &str, price: i64, discounted: Option<i64>, quantity: u32) -> CartLineItem {
        CartLineItem {
            book: BookRecord {
                id: BookId(id.to_owned()),
                title: format!("Title {id}"),
                author: "Author".to_owned(),
                genre: Genre::Essays,
                price: Decimal::from(price),
                discounted_price: discounted.map(Decimal::from),
                rating: 4,
                image: String::new(),
                description: None,
            },
            quantity,
        }
    }

    #[test]
    fn empty_cart_totals_zero() {
        let result = price(&[], None);
        assert_eq!(result.subtotal, Decimal::ZERO);
        assert_eq!(result.shipping, Decimal::ZERO);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.coupon, CouponOutcome::NotProvided);
    }

    #[test]
    fn subtotal_uses_effective_price_times_quantity() {
        let result = price(&[line("a", 300, Some(200), 2), line("b", 150, None, 1)], None);
        assert_eq!(result.subtotal, Decimal::from(550));
    }

    #[test]
    fn shipping_is_free_strictly_above_threshold() {
        assert_eq!(price(&[line("a", 1000, None, 1)], None).shipping, Decimal::ZERO);
        assert_eq!(price(&[line("a", 999, None, 1)], None).shipping, Decimal::from(99));
        assert_eq!(price(&[line("a", 500, None, 1)], None).shipping, Decimal::from(99));
    }

    #[test]
    fn coupon_discount_is_capped() {
        let capped = price(&[line("a", 3000, None, 2)], Some("BOOKS50"));
        assert_eq!(capped.discount, Decimal::from(500));
        assert_eq!(capped.total, Decimal::from(5500));

        let uncapped = price(&[line("a", 1000, None, 2)], Some("books50 "));
        assert_eq!(uncapped.discount, Decimal::from(200));
        assert_eq!(uncapped.coupon, CouponOutcome::Applied);
    }

    #[test]
    fn unknown_coupon_is_reported_without_discount() {
        let result = price(&[line("a", 2000, None, 1)], Some("FREEBOOKS"));
        assert_eq!(result.coupon, CouponOutcome::Invalid);
        assert_eq!(result.discount, Decimal::ZERO);
        assert_eq!(result.total, Decimal::from(2000));
    }

    #[test]
    fn blank_coupon_code_is_invalid_not_absent() {
        for code in ["", "   "] {
            let result = price(&[line("a", 500, None, 1)], Some(code));
            assert_eq!(result.coupon, CouponOutcome::Invalid, "code {code:?}");
            assert_eq!(result.discount, Decimal::ZERO);
            assert_eq!(result.total, Decimal::from(599));
        }

        assert_eq!(price(&[line("a", 500, None, 1)], None).coupon, CouponOutcome::NotProvided);
    }

    #[test]
    fn total_never_goes_negative() {
        let policy = PricingPolicy {
            flat_shipping_fee: Decimal::ZERO,
            free_shipping_threshold: Decimal::ZERO,
            coupon: CouponPolicy {
                code: SecretString::from("ALLFREE".to_owned()),
                rate_pct: Decimal::from(150),
                max_discount: Decimal::from(10_000),
            },
        };

        let result = price_cart_with_policy(&[line("a", 120, None, 1)], Some("allfree"), &policy);
        assert_eq!(result.discount, Decimal::from(180));
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn trace_records_each_stage_in_order() {
        let engine = DeterministicPricingEngine::default();
        let result = engine.price(&[line("a", 400, None, 1)], Some("BOOKS50"));
        let stages: Vec<&str> = result.trace.iter().map(|step| step.stage.as_str()).collect();

        assert_eq!(stages, vec!["subtotal", "shipping", "coupon", "total"]);
        assert_eq!(result.trace[3].amount, result.total);
        assert_eq!(result.total, Decimal::from(459));
    }

    #[test]
    fn debug_output_does_not_leak_coupon_code() {
        let debug = format!("{:?}", PricingPolicy::default());
        assert!(!debug.contains("BOOKS50"));
    }
}
