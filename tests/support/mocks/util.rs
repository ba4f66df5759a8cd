// tests/support/mocks/util.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Fixed publication date for deterministic date-scoped tests.
static FIXED_PUB_DATE: Lazy<NaiveDate> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("invalid date in tests/support/mocks/util.rs")
});

pub fn fixed_pub_date() -> NaiveDate {
    *FIXED_PUB_DATE
}

/// Leaves input untouched, so tests control the exact candidate text.
#[derive(Clone)]
pub struct DummySlug;

impl autoslug::application::ports::util::SlugGenerator for DummySlug {
    fn slugify(&self, s: &str) -> String {
        s.to_string()
    }
}
