//! The sequenced product-save chain.
//!
//! A submit performs, in order: brand creation (when the admin typed a new
//! brand name), category creation (when they typed a new category), variant
//! expansion, then a single product create or update. The steps must run in
//! that order because the brand and category ids are inputs to the product
//! payload. Any failure stops the chain immediately; the draft is taken by
//! reference and never mutated, so the admin can fix the problem and retry
//! without re-entering data.
//!
//! Partially-completed submits are not rolled back: a brand created before
//! a later step failed stays created, and the [`SubmitError`] carries its
//! id so the retry can reuse it instead of creating a duplicate.

use storekeeper_core::{
    BrandId, CategoryId, Label, MediaEntry, ProductData, ProductId, ProductPayload,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::builder::{
    AttributeSelectionState, ColorGroup, ExpandWarning, UniformRow, ValidationError,
    VariantTemplate, expand, expand_uniform,
};
use crate::catalog::{
    CatalogClient, CatalogError, CreateBrandRequest, CreateCategoryRequest,
};

/// The subset of the catalog API the submit chain drives.
///
/// [`CatalogClient`] implements it; tests substitute a scripted double.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Create a brand.
    async fn create_brand(
        &self,
        request: &CreateBrandRequest,
    ) -> Result<storekeeper_core::Brand, CatalogError>;

    /// Create a category.
    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<storekeeper_core::Category, CatalogError>;

    /// Create a product.
    async fn create_product(&self, payload: &ProductPayload)
    -> Result<ProductData, CatalogError>;

    /// Update an existing product.
    async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductData, CatalogError>;
}

impl CatalogApi for CatalogClient {
    async fn create_brand(
        &self,
        request: &CreateBrandRequest,
    ) -> Result<storekeeper_core::Brand, CatalogError> {
        Self::create_brand(self, request).await
    }

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<storekeeper_core::Category, CatalogError> {
        Self::create_category(self, request).await
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ProductData, CatalogError> {
        Self::create_product(self, payload).await
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductData, CatalogError> {
        Self::update_product(self, product_id, payload).await
    }
}

/// Brand selection on a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandChoice {
    /// No brand.
    None,
    /// An existing brand picked from the listing.
    Existing(BrandId),
    /// A brand to create as part of the submit.
    New(String),
}

/// Primary-category selection on a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    /// No primary category; size entry is optional in that case.
    None,
    /// An existing category. `requires_sizes` comes from the listing.
    Existing {
        id: CategoryId,
        requires_sizes: bool,
    },
    /// A category to create as part of the submit.
    New {
        title: String,
        requires_sizes: bool,
    },
}

impl CategoryChoice {
    /// Whether the chosen category mandates a size breakdown.
    #[must_use]
    pub const fn requires_sizes(&self) -> bool {
        match self {
            Self::None => false,
            Self::Existing { requires_sizes, .. } | Self::New { requires_sizes, .. } => {
                *requires_sizes
            }
        }
    }
}

/// Variant-authoring state on a draft, one per builder mode.
#[derive(Debug, Clone)]
pub enum DraftVariants {
    /// Per-combination color/size authoring.
    Groups {
        groups: Vec<ColorGroup>,
        template: VariantTemplate,
    },
    /// Single shared row for the whole product.
    Uniform {
        selection: AttributeSelectionState,
        row: UniformRow,
        published: bool,
    },
}

/// Everything the admin entered before pressing save.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Present when editing an existing product; `None` creates a new one.
    pub product_id: Option<ProductId>,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Rich-text description.
    pub description_html: Option<String>,
    /// Brand selection.
    pub brand: BrandChoice,
    /// Primary-category selection.
    pub category: CategoryChoice,
    /// Additional categories beyond the primary one.
    pub extra_category_ids: Vec<CategoryId>,
    /// Storefront visibility.
    pub published: bool,
    /// Whether the product is featured on the storefront.
    pub featured: bool,
    /// Badges rendered over product imagery.
    pub labels: Vec<Label>,
    /// Variant-authoring state.
    pub variants: DraftVariants,
}

/// A failed submit, annotated with how far the chain got.
///
/// `created_brand_id`/`created_category_id` are set when the corresponding
/// resource was newly created before the failure, so the retry can pick it
/// from the listing instead of recreating it.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Variant expansion rejected the draft.
    #[error("validation failed: {source}")]
    Validation {
        source: ValidationError,
        created_brand_id: Option<BrandId>,
        created_category_id: Option<CategoryId>,
    },

    /// Brand creation failed; nothing was created.
    #[error("brand creation failed: {source}")]
    Brand { source: CatalogError },

    /// Category creation failed.
    #[error("category creation failed: {source}")]
    Category {
        source: CatalogError,
        created_brand_id: Option<BrandId>,
    },

    /// The final product create/update failed.
    #[error("product save failed: {source}")]
    Product {
        source: CatalogError,
        created_brand_id: Option<BrandId>,
        created_category_id: Option<CategoryId>,
    },
}

impl SubmitError {
    /// Brand created before the chain aborted, if any.
    #[must_use]
    pub const fn created_brand_id(&self) -> Option<BrandId> {
        match self {
            Self::Brand { .. } => None,
            Self::Validation {
                created_brand_id, ..
            }
            | Self::Category {
                created_brand_id, ..
            }
            | Self::Product {
                created_brand_id, ..
            } => *created_brand_id,
        }
    }

    /// Category created before the chain aborted, if any.
    #[must_use]
    pub const fn created_category_id(&self) -> Option<CategoryId> {
        match self {
            Self::Brand { .. } | Self::Category { .. } => None,
            Self::Validation {
                created_category_id,
                ..
            }
            | Self::Product {
                created_category_id,
                ..
            } => *created_category_id,
        }
    }
}

/// A completed submit.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The saved product as the catalog returned it.
    pub product: ProductData,
    /// Brand newly created during this submit, if any.
    pub created_brand_id: Option<BrandId>,
    /// Category newly created during this submit, if any.
    pub created_category_id: Option<CategoryId>,
    /// Non-blocking expansion warnings to show after saving.
    pub warnings: Vec<ExpandWarning>,
}

/// Run the full submit chain against the catalog API.
///
/// # Errors
///
/// Returns a [`SubmitError`] naming the failed step and carrying the ids of
/// resources created before the failure. The draft itself is never mutated.
#[instrument(skip(api, draft), fields(slug = %draft.slug, update = draft.product_id.is_some()))]
pub async fn submit_product<A: CatalogApi>(
    api: &A,
    draft: &ProductDraft,
    locale: &str,
) -> Result<SubmitOutcome, SubmitError> {
    // Step 1: brand.
    let mut created_brand_id = None;
    let brand_id = match &draft.brand {
        BrandChoice::None => None,
        BrandChoice::Existing(id) => Some(*id),
        BrandChoice::New(name) => {
            let brand = api
                .create_brand(&CreateBrandRequest {
                    name: name.clone(),
                    locale: locale.to_string(),
                })
                .await
                .map_err(|source| SubmitError::Brand { source })?;
            info!(brand_id = %brand.id, "created brand");
            created_brand_id = Some(brand.id);
            Some(brand.id)
        }
    };

    // Step 2: category.
    let mut created_category_id = None;
    let primary_category_id = match &draft.category {
        CategoryChoice::None => None,
        CategoryChoice::Existing { id, .. } => Some(*id),
        CategoryChoice::New {
            title,
            requires_sizes,
        } => {
            let category = api
                .create_category(&CreateCategoryRequest {
                    title: title.clone(),
                    locale: locale.to_string(),
                    requires_sizes: *requires_sizes,
                })
                .await
                .map_err(|source| SubmitError::Category {
                    source,
                    created_brand_id,
                })?;
            info!(category_id = %category.id, "created category");
            created_category_id = Some(category.id);
            Some(category.id)
        }
    };

    // Step 3: expand.
    let (variants, media, warnings, attribute_ids) = expand_draft(draft).map_err(|source| {
        SubmitError::Validation {
            source,
            created_brand_id,
            created_category_id,
        }
    })?;
    for warning in &warnings {
        warn!(%warning, "expansion warning");
    }

    // Step 4: one product create or update.
    let mut category_ids = Vec::new();
    if let Some(id) = primary_category_id {
        category_ids.push(id);
    }
    category_ids.extend(
        draft
            .extra_category_ids
            .iter()
            .filter(|id| Some(**id) != primary_category_id),
    );

    let payload = ProductPayload {
        title: draft.title.clone(),
        slug: draft.slug.clone(),
        description_html: draft.description_html.clone(),
        brand_id,
        primary_category_id,
        category_ids,
        published: draft.published,
        featured: draft.featured,
        variants,
        media,
        labels: draft.labels.clone(),
        attribute_ids,
    };

    let product = match draft.product_id {
        Some(id) => api.update_product(id, &payload).await,
        None => api.create_product(&payload).await,
    }
    .map_err(|source| SubmitError::Product {
        source,
        created_brand_id,
        created_category_id,
    })?;

    info!(product_id = %product.id, variants = payload.variants.len(), "product saved");

    Ok(SubmitOutcome {
        product,
        created_brand_id,
        created_category_id,
        warnings,
    })
}

type ExpandedDraft = (
    Vec<storekeeper_core::VariantRecord>,
    Vec<MediaEntry>,
    Vec<ExpandWarning>,
    Vec<storekeeper_core::AttributeId>,
);

fn expand_draft(draft: &ProductDraft) -> Result<ExpandedDraft, ValidationError> {
    match &draft.variants {
        DraftVariants::Groups { groups, template } => {
            let expansion = expand(
                groups,
                template,
                &draft.slug,
                draft.category.requires_sizes(),
            )?;
            Ok((expansion.variants, expansion.media, expansion.warnings, Vec::new()))
        }
        DraftVariants::Uniform {
            selection,
            row,
            published,
        } => {
            let (record, attribute_ids) = expand_uniform(selection, row, &draft.slug, *published)?;
            let media = row
                .images
                .iter()
                .enumerate()
                .map(|(index, url)| {
                    MediaEntry::image(
                        url.clone(),
                        i32::try_from(index).unwrap_or(i32::MAX),
                        index == 0,
                    )
                })
                .collect();
            Ok((vec![record], media, Vec::new(), attribute_ids))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Mutex;
    use storekeeper_core::{Brand, Category};

    /// Scripted catalog double recording the calls it receives.
    #[derive(Default)]
    struct FakeCatalog {
        calls: Mutex<Vec<&'static str>>,
        fail_category: bool,
        fail_product: bool,
    }

    impl FakeCatalog {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl CatalogApi for FakeCatalog {
        async fn create_brand(
            &self,
            request: &CreateBrandRequest,
        ) -> Result<Brand, CatalogError> {
            self.record("create_brand");
            Ok(Brand {
                id: BrandId::new(7),
                name: request.name.clone(),
            })
        }

        async fn create_category(
            &self,
            request: &CreateCategoryRequest,
        ) -> Result<Category, CatalogError> {
            self.record("create_category");
            if self.fail_category {
                return Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(Category {
                id: CategoryId::new(3),
                title: request.title.clone(),
                requires_sizes: request.requires_sizes,
            })
        }

        async fn create_product(
            &self,
            payload: &ProductPayload,
        ) -> Result<ProductData, CatalogError> {
            self.record("create_product");
            if self.fail_product {
                return Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(saved_product(payload))
        }

        async fn update_product(
            &self,
            _product_id: ProductId,
            payload: &ProductPayload,
        ) -> Result<ProductData, CatalogError> {
            self.record("update_product");
            if self.fail_product {
                return Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(saved_product(payload))
        }
    }

    fn saved_product(payload: &ProductPayload) -> ProductData {
        ProductData {
            id: ProductId::new(42),
            title: payload.title.clone(),
            slug: payload.slug.clone(),
            description_html: payload.description_html.clone(),
            brand_id: payload.brand_id,
            primary_category_id: payload.primary_category_id,
            category_ids: payload.category_ids.clone(),
            published: payload.published,
            featured: payload.featured,
            variants: payload.variants.clone(),
            media: payload.media.clone(),
            labels: payload.labels.clone(),
        }
    }

    fn draft() -> ProductDraft {
        let mut group = ColorGroup::new("red", "Red");
        group.base_price = Some(Decimal::new(2000, 2));
        group.base_stock = Some(5);
        group.push_image("/uploads/red.jpg".to_string());

        ProductDraft {
            product_id: None,
            title: "Summer Tee".to_string(),
            slug: "summer-tee".to_string(),
            description_html: None,
            brand: BrandChoice::New("Acme".to_string()),
            category: CategoryChoice::New {
                title: "Tops".to_string(),
                requires_sizes: false,
            },
            extra_category_ids: vec![CategoryId::new(9)],
            published: true,
            featured: false,
            labels: Vec::new(),
            variants: DraftVariants::Groups {
                groups: vec![group],
                template: VariantTemplate::default(),
            },
        }
    }

    #[tokio::test]
    async fn test_full_chain_in_order() {
        let api = FakeCatalog::default();
        let outcome = submit_product(&api, &draft(), "en").await.expect("submit");

        assert_eq!(
            api.calls(),
            vec!["create_brand", "create_category", "create_product"]
        );
        assert_eq!(outcome.created_brand_id, Some(BrandId::new(7)));
        assert_eq!(outcome.created_category_id, Some(CategoryId::new(3)));
        assert_eq!(outcome.product.id, ProductId::new(42));
        assert_eq!(outcome.product.variants.len(), 1);
        assert_eq!(
            outcome.product.category_ids,
            vec![CategoryId::new(3), CategoryId::new(9)]
        );
    }

    #[tokio::test]
    async fn test_existing_ids_skip_creation() {
        let api = FakeCatalog::default();
        let mut d = draft();
        d.brand = BrandChoice::Existing(BrandId::new(1));
        d.category = CategoryChoice::Existing {
            id: CategoryId::new(2),
            requires_sizes: false,
        };

        let outcome = submit_product(&api, &d, "en").await.expect("submit");
        assert_eq!(api.calls(), vec!["create_product"]);
        assert_eq!(outcome.created_brand_id, None);
        assert_eq!(outcome.created_category_id, None);
    }

    #[tokio::test]
    async fn test_category_failure_stops_chain_and_reports_brand() {
        let api = FakeCatalog {
            fail_category: true,
            ..FakeCatalog::default()
        };

        let err = submit_product(&api, &draft(), "en")
            .await
            .expect_err("must fail");
        assert_eq!(api.calls(), vec!["create_brand", "create_category"]);
        assert!(matches!(err, SubmitError::Category { .. }));
        assert_eq!(err.created_brand_id(), Some(BrandId::new(7)));
        assert_eq!(err.created_category_id(), None);
    }

    #[tokio::test]
    async fn test_validation_failure_reports_created_resources() {
        let api = FakeCatalog::default();
        let mut d = draft();
        d.category = CategoryChoice::New {
            title: "Shoes".to_string(),
            requires_sizes: true, // the draft's group has no sizes
        };

        let err = submit_product(&api, &d, "en").await.expect_err("must fail");
        assert_eq!(api.calls(), vec!["create_brand", "create_category"]);
        assert!(matches!(
            err,
            SubmitError::Validation {
                source: ValidationError::MissingSizes { .. },
                ..
            }
        ));
        assert_eq!(err.created_brand_id(), Some(BrandId::new(7)));
        assert_eq!(err.created_category_id(), Some(CategoryId::new(3)));
    }

    #[tokio::test]
    async fn test_product_failure_reports_partial_progress() {
        let api = FakeCatalog {
            fail_product: true,
            ..FakeCatalog::default()
        };

        let err = submit_product(&api, &draft(), "en")
            .await
            .expect_err("must fail");
        assert!(matches!(err, SubmitError::Product { .. }));
        assert_eq!(err.created_brand_id(), Some(BrandId::new(7)));
        assert_eq!(err.created_category_id(), Some(CategoryId::new(3)));
    }

    #[tokio::test]
    async fn test_update_path_uses_put() {
        let api = FakeCatalog::default();
        let mut d = draft();
        d.product_id = Some(ProductId::new(42));

        submit_product(&api, &d, "en").await.expect("submit");
        assert_eq!(
            api.calls(),
            vec!["create_brand", "create_category", "update_product"]
        );
    }

    #[tokio::test]
    async fn test_uniform_mode_single_record() {
        use crate::builder::SelectionAction;
        use storekeeper_core::{AttributeId, AttributeValueId};

        let api = FakeCatalog::default();
        let mut d = draft();
        d.variants = DraftVariants::Uniform {
            selection: AttributeSelectionState::new().apply(&SelectionAction::ToggleValue {
                attribute_id: AttributeId::new(1),
                value_id: AttributeValueId::new(10),
            }),
            row: UniformRow {
                price: Some(Decimal::new(1500, 2)),
                stock: Some(3),
                images: vec!["/a.jpg".to_string(), "/b.jpg".to_string()],
                ..UniformRow::default()
            },
            published: true,
        };

        let outcome = submit_product(&api, &d, "en").await.expect("submit");
        assert_eq!(outcome.product.variants.len(), 1);
        assert_eq!(outcome.product.media.len(), 2);
        assert!(outcome.product.media.first().unwrap().is_featured);
    }
}
