//! Where page pixels come from

use std::path::{Path, PathBuf};

use super::atlas_data::PageData;
use crate::error::EngineResult;
use crate::pixels::{self, PixelsData};

/// Supplies pixel data for atlas pages during `load_stamps`
pub trait PageSource {
    fn load_pixels(&mut self, prefix: Option<&Path>, page: &PageData) -> EngineResult<PixelsData>;
}

/// Decodes page images from disk, resolving names against the prefix
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePageSource;

impl FilePageSource {
    pub fn page_path(prefix: Option<&Path>, page: &PageData) -> PathBuf {
        match prefix {
            Some(prefix) => prefix.join(&page.name),
            None => PathBuf::from(&page.name),
        }
    }
}

impl PageSource for FilePageSource {
    fn load_pixels(&mut self, prefix: Option<&Path>, page: &PageData) -> EngineResult<PixelsData> {
        pixels::load_pixels(&Self::page_path(prefix, page))
    }
}
