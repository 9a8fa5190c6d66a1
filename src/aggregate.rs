use std::collections::HashMap;
use tracing::debug;

use crate::models::{Category, LinkDecision, Offer, OfferGroup, Row, SemanticField, DEFAULT_TITLE};
use crate::parsers::{
    group_label, resolve_semantic, row_is_included, ImagePolicy, ImageResolver, LinkPolicy,
    SourceKeyMapper,
};

/// Projects rows into display-ready offers using the configured policies.
#[derive(Debug, Clone, Default)]
pub struct OfferBuilder {
    images: ImageResolver,
    links: LinkPolicy,
}

impl OfferBuilder {
    pub fn new(
        image_policy: ImagePolicy,
        links: LinkPolicy,
        logos: HashMap<String, String>,
        sources: SourceKeyMapper,
    ) -> Self {
        Self {
            images: ImageResolver::new(image_policy, logos, sources),
            links,
        }
    }

    pub fn build(&self, row: &Row) -> Offer {
        let text = |field| resolve_semantic(row, field).map(str::to_string);

        let title = text(SemanticField::Title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let image = self
            .images
            .resolve(resolve_semantic(row, SemanticField::Image), row.source_file());
        let link = resolve_semantic(row, SemanticField::Link)
            .map(|raw| LinkDecision::from_normalized(self.links.normalize(raw)))
            .unwrap_or(LinkDecision::NoLink);

        Offer {
            title,
            description: text(SemanticField::Description),
            terms: text(SemanticField::Terms),
            coupon: text(SemanticField::Coupon),
            image,
            link,
            source_file: row.source_file().to_string(),
        }
    }

    /// Included rows only, projected in encounter order.
    pub fn build_included<'r, I>(&self, rows: I) -> Vec<Offer>
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let mut skipped = 0usize;
        let offers = rows
            .into_iter()
            .filter(|row| {
                let keep = row_is_included(row);
                if !keep {
                    skipped += 1;
                }
                keep
            })
            .map(|row| self.build(row))
            .collect();
        debug!("Skipped {} rows not flagged as non-payment offers", skipped);
        offers
    }
}

/// Rows flagged for display, in encounter order.
pub fn filter_included<'r, I>(rows: I) -> Vec<&'r Row>
where
    I: IntoIterator<Item = &'r Row>,
{
    rows.into_iter().filter(|row| row_is_included(row)).collect()
}

/// Groups offers by source label. Configured files come first in their
/// configured order; anything else follows in order of first appearance.
/// Groups with no offers are omitted.
pub fn group(offers: Vec<Offer>, category: Option<&Category>) -> Vec<OfferGroup> {
    let mut order: Vec<String> = Vec::new();
    if let Some(category) = category {
        for file in &category.files {
            let label = group_label(file);
            if !order.contains(&label) {
                order.push(label);
            }
        }
    }

    let mut buckets: HashMap<String, Vec<Offer>> = HashMap::new();
    for offer in offers {
        let label = group_label(&offer.source_file);
        if !order.contains(&label) {
            order.push(label.clone());
        }
        buckets.entry(label).or_default().push(offer);
    }

    order
        .into_iter()
        .filter_map(|label| {
            buckets
                .remove(&label)
                .map(|offers| OfferGroup { label, offers })
        })
        .collect()
}
