//! Random retail order sampler

use order_bench_core::{Sampler, WorkItem, WorkItemId};
use rust_decimal::Decimal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ean13::ean13_check_digit;

/// Inclusive quantity range of generated orders
pub const QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=25;

/// Inclusive price range of generated orders, in cents
pub const PRICE_CENTS_RANGE: std::ops::RangeInclusive<i64> = 100..=5_000;

/// Generates orders with a random id, a valid EAN-13 barcode, a quantity
/// in [1, 25] and a price in [1.00, 50.00]
///
/// The sampler owns its random source: build it with
/// [`seeded`](Self::seeded) to reproduce a run's payloads exactly.
#[derive(Debug, Clone)]
pub struct OrderSampler {
    rng: StdRng,
}

impl OrderSampler {
    /// Sampler backed by OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sampler
    pub fn seeded(seed: u64) -> Self {
        tracing::debug!(seed, "Seeding order sampler");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn barcode(&mut self) -> String {
        let mut code: String = (0..12)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect();
        // twelve ASCII digits always have a check digit
        let check = ean13_check_digit(&code).unwrap_or_default();
        code.push(char::from(b'0' + check));
        code
    }
}

impl Default for OrderSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Sampler for OrderSampler {
    fn name(&self) -> &str {
        "order"
    }

    fn sample(&mut self) -> WorkItem {
        let id = WorkItemId::from_random_bytes(self.rng.gen());
        let barcode = self.barcode();
        let quantity = self.rng.gen_range(QUANTITY_RANGE);
        let price = Decimal::new(self.rng.gen_range(PRICE_CENTS_RANGE), 2);

        WorkItem::new(id, barcode, quantity, price)
    }
}
