pub mod fixtures;
pub mod wire;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use soiree_core::{CatalogSnapshot, Category, Supplier};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog decode error: {0}")]
    Decode(String),
}

/// Read-only supplier catalog, injected into callers rather than held as
/// ambient state. Retrieval may be backed by anything that can produce a
/// supplier snapshot; the engine only ever sees the returned vectors.
#[async_trait]
pub trait SupplierCatalog: Send + Sync {
    async fn all_suppliers(&self) -> Result<Vec<Supplier>, CatalogError>;

    async fn suppliers_in_category(
        &self,
        category: Category,
    ) -> Result<Vec<Supplier>, CatalogError>;

    /// Entertainment suppliers whose primary or service theme set carries
    /// the given theme.
    async fn entertainment_by_theme(&self, theme: &str) -> Result<Vec<Supplier>, CatalogError>;
}

/// Catalog view for one planning run: the full snapshot plus the
/// theme-filtered entertainment pool, fetched once at the boundary.
pub async fn snapshot_for_theme(
    catalog: &dyn SupplierCatalog,
    theme: &str,
) -> Result<CatalogSnapshot, CatalogError> {
    let suppliers = catalog.all_suppliers().await?;
    let themed_entertainment = catalog.entertainment_by_theme(theme).await?;
    debug!(
        supplier_count = suppliers.len(),
        themed_entertainment_count = themed_entertainment.len(),
        theme,
        "catalog snapshot assembled"
    );
    Ok(CatalogSnapshot { suppliers, themed_entertainment })
}

/// In-memory catalog over a fixed supplier list. Candidate order is the
/// catalog order, which the selector's tie-break depends on.
#[derive(Clone, Debug, Default)]
pub struct InMemorySupplierCatalog {
    suppliers: Vec<Supplier>,
}

impl InMemorySupplierCatalog {
    pub fn new(suppliers: Vec<Supplier>) -> Self {
        Self { suppliers }
    }

    /// Loads a JSON catalog document, normalizing every supplier's raw
    /// availability shapes into the closed `AvailabilitySpec` union.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let suppliers = wire::decode_catalog(raw)?;
        Ok(Self::new(suppliers))
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

#[async_trait]
impl SupplierCatalog for InMemorySupplierCatalog {
    async fn all_suppliers(&self) -> Result<Vec<Supplier>, CatalogError> {
        Ok(self.suppliers.clone())
    }

    async fn suppliers_in_category(
        &self,
        category: Category,
    ) -> Result<Vec<Supplier>, CatalogError> {
        Ok(self
            .suppliers
            .iter()
            .filter(|supplier| supplier.category == category)
            .cloned()
            .collect())
    }

    async fn entertainment_by_theme(&self, theme: &str) -> Result<Vec<Supplier>, CatalogError> {
        Ok(self
            .suppliers
            .iter()
            .filter(|supplier| {
                supplier.category == Category::Entertainment
                    && (supplier.has_theme(theme) || supplier.has_service_theme(theme))
            })
            .cloned()
            .collect())
    }
}
