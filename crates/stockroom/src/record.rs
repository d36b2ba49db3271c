use crate::view::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

///
/// ProductRecord
///
/// One catalog entry. Absent numeric attributes are modeled as `None`
/// rather than flag-plus-sentinel pairs; [`Self::price_or_zero`] recovers
/// the on-disk `0` sentinel where callers need it.
///
/// Records are born either from [`crate::parse::parse_line`] (read path) or
/// from [`Self::new`] plus the `with_*` builders (write path). Only the
/// write path clamps the sale percentage; parsing preserves out-of-range
/// values exactly as the file holds them.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: Option<Decimal>,
    pub sale_percent: Option<Decimal>,
    pub size: String,
    pub fabric: String,

    /// Raw single-letter audience code (`M`/`W`/`K`/`B`) or empty. Kept as
    /// the file holds it so malformed entries survive a rewrite unchanged.
    pub sex: String,

    /// Free text; the only field that may itself contain the delimiter.
    pub description: String,

    /// Zero-based ordinal among the records pushed at load time. Stale
    /// after any load/save cycle and never serialized.
    #[serde(skip)]
    pub source_line: Option<usize>,
}

impl ProductRecord {
    /// Write-path constructor: name and price required, everything else
    /// absent or empty.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            ..Self::default()
        }
    }

    ///
    /// BUILDERS
    ///

    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    #[must_use]
    pub fn with_fabric(mut self, fabric: impl Into<String>) -> Self {
        self.fabric = fabric.into();
        self
    }

    /// Set the audience code from a category; `Category::All` clears it.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.sex = category.code().map(str::to_string).unwrap_or_default();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the sale percentage, clamped to `[0, 100]`. Clamping lives here
    /// on the input path only; the parser does not normalize file contents.
    #[must_use]
    pub fn with_sale(mut self, percent: Decimal) -> Self {
        self.sale_percent = Some(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED));
        self
    }

    ///
    /// ACCESSORS
    ///

    /// Price with the serialization sentinel applied: absent prices read
    /// back as zero, exactly as the codec writes them.
    #[must_use]
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Selling price after the sale discount, `None` when the record has
    /// no price at all.
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        let price = self.price?;

        Some(match self.sale_percent {
            Some(sale) => price * (Decimal::ONE_HUNDRED - sale) / Decimal::ONE_HUNDRED,
            None => price,
        })
    }

    /// Category implied by the audience code, `None` when the code is
    /// empty or unrecognized.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_code(&self.sex)
    }
}

///
/// TESTS
///
