//! Release-specific mapping of a product onto the output row.

use onix_ingest::{DocumentNode, RawProductRecord};
use onix_model::{FieldIssue, NormalizedBook, OnixBand, ReleaseVersion, ValidationFailure};

use crate::context::ExtractionContext;
use crate::fields::{self, text_at};

/// `PublishingDateRole` of the publication date (3.x).
const PUBLICATION_DATE_ROLE: &str = "01";
/// `PublishingDateRole` of the on-sale date (3.x).
const ON_SALE_DATE_ROLE: &str = "02";

/// Field mapping strategy for one ONIX release band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionAdapter {
    V2,
    V3,
}

impl VersionAdapter {
    /// Adapter for a declared release; `None` for unsupported releases.
    pub fn for_release(release: &ReleaseVersion) -> Option<Self> {
        release.band().map(Self::for_band)
    }

    pub const fn for_band(band: OnixBand) -> Self {
        match band {
            OnixBand::V2 => Self::V2,
            OnixBand::V3 => Self::V3,
        }
    }

    pub const fn band(self) -> OnixBand {
        match self {
            Self::V2 => OnixBand::V2,
            Self::V3 => OnixBand::V3,
        }
    }

    /// Map one product record.
    ///
    /// The returned book is never selected; selection is applied later by
    /// reconciliation. Every missing required field is reported at once.
    pub fn extract(
        self,
        record: &RawProductRecord,
        context: &ExtractionContext,
    ) -> Result<NormalizedBook, ValidationFailure> {
        let product = &record.product;
        let isbn = fields::isbn(product);
        let categories = fields::categories(product, context);
        let price = fields::usd_price(product);

        let mut issues = Vec::new();
        let mut require = |field: &str, value: Option<String>| {
            value.unwrap_or_else(|| {
                issues.push(FieldIssue::missing(field));
                String::new()
            })
        };

        let book = NormalizedBook {
            isbn: require("isbn", isbn.clone()),
            title: require("title", self.title(product)),
            subtitle: text_at(product, ".//Subtitle"),
            contributors: fields::contributors(product),
            imprint: require("imprint", text_at(product, ".//ImprintName")),
            pub_date: require("pubDate", self.publication_date(product)),
            on_sale_date: require("onSaleDate", self.on_sale_date(product)),
            us_price: require("usPrice", price.clone()),
            // Same USD amount as usPrice; no CAD lookup is made.
            ca_price: price,
            runtime: fields::runtime(product),
            classification_code: require("BISAC", self.classification_code(product)),
            language: require("language", text_at(product, ".//LanguageCode")),
            primary_category: categories.primary,
            secondary_categories: categories.secondary,
            custom_category: categories.custom,
            selected: false,
        };

        if issues.is_empty() {
            tracing::trace!(isbn = %book.isbn, band = %self.band(), "mapped product");
            Ok(book)
        } else {
            Err(ValidationFailure { isbn, issues })
        }
    }

    fn title<N: DocumentNode>(self, product: &N) -> Option<String> {
        let title_text = text_at(product, ".//TitleText");
        match self {
            Self::V2 => title_text,
            Self::V3 => title_text.or_else(|| {
                let parts: Vec<String> = [
                    text_at(product, ".//TitlePrefix"),
                    text_at(product, ".//TitleWithoutPrefix"),
                ]
                .into_iter()
                .flatten()
                .collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }),
        }
    }

    fn publication_date<N: DocumentNode>(self, product: &N) -> Option<String> {
        match self {
            Self::V2 => text_at(product, ".//PublicationDate"),
            Self::V3 => publishing_date(product, PUBLICATION_DATE_ROLE),
        }
    }

    fn on_sale_date<N: DocumentNode>(self, product: &N) -> Option<String> {
        match self {
            Self::V2 => text_at(product, ".//OnSaleDate"),
            Self::V3 => publishing_date(product, ON_SALE_DATE_ROLE),
        }
    }

    fn classification_code<N: DocumentNode>(self, product: &N) -> Option<String> {
        match self {
            Self::V2 => text_at(product, ".//BASICMainSubject"),
            Self::V3 => fields::main_subject_code(product),
        }
    }
}

fn publishing_date<N: DocumentNode>(product: &N, role: &str) -> Option<String> {
    product
        .find_all(".//PublishingDate")
        .into_iter()
        .find(|date| date.find_text("./PublishingDateRole") == Some(role))
        .and_then(|date| text_at(date, "./Date"))
}
