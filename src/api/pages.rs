use actix_files::NamedFile;
use actix_web::web;
use std::path::PathBuf;

use crate::utils::AppError;

/// Where the storefront HTML pages and assets live on disk.
#[derive(Debug, Clone)]
pub struct SiteDirs {
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

async fn page(site: &SiteDirs, name: &str) -> Result<NamedFile, AppError> {
    let path = site.templates_dir.join(name);
    NamedFile::open_async(&path).await.map_err(|e| {
        log::warn!("⚠️ Page {} unavailable: {}", path.display(), e);
        AppError::NotFound("Page not found".to_string())
    })
}

pub async fn home(site: web::Data<SiteDirs>) -> Result<NamedFile, AppError> {
    page(&site, "index.html").await
}

pub async fn store(site: web::Data<SiteDirs>) -> Result<NamedFile, AppError> {
    page(&site, "store.html").await
}

pub async fn buy(site: web::Data<SiteDirs>) -> Result<NamedFile, AppError> {
    page(&site, "buy.html").await
}
