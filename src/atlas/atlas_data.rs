//! Texture Atlas Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in atlas_operations.rs

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::pixels::PixelsData;
use crate::stamp::StampData;
use crate::texture::{Texture, TextureFilter};

/// Index into `TextureAtlasData::pages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub usize);

/// Index into `TextureAtlasData::regions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// Index into `TextureAtlasData::groups`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// Left / right / top / bottom insets, in the order the atlas text lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lrtb {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// One packed image of the atlas
#[derive(Debug, Clone)]
pub struct PageData {
    /// Image file name, relative to the atlas prefix
    pub name: String,
    /// Declared size; 0 when the page omits `size`
    pub width: u32,
    pub height: u32,
    pub pixel_format: String,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub repeat_x: bool,
    pub repeat_y: bool,
    pub premultiplied_alpha: bool,

    /// Pixels waiting for upload; `load_stamps` loads them unless supplied
    /// beforehand and drops them once the texture exists
    pub pixels: Option<PixelsData>,
    pub texture: Option<Texture>,
}

/// One named sub-image of a page
#[derive(Debug, Clone)]
pub struct RegionData {
    pub id: RegionId,
    /// Grouping name (extension and, with auto-indexing, the index removed)
    pub name: String,
    pub index: Option<u32>,
    pub page: PageId,
    pub group: GroupId,

    /// Bounds within the page, in pixels
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,

    /// Trimmed-rect offset and untrimmed size
    pub off_x: i32,
    pub off_y: i32,
    pub orig_w: i32,
    pub orig_h: i32,

    /// Rotation in radians, applied to the drawn stamp
    pub rotate: f32,

    /// Nine-patch insets
    pub split: Option<Lrtb>,
    pub pad: Option<Lrtb>,

    pub stamp: Option<StampData>,
    /// Nine-patch parts, indexed `x + y * 3`
    pub nine: Option<Vec<StampData>>,
}

/// Regions sharing one name.
///
/// `head` is the first region seen with the name. `index_map` is `None` for
/// an unindexed region and otherwise holds every member by index; gaps are
/// allowed until `remove_empty_indices` compacts them.
#[derive(Debug, Clone)]
pub struct GroupData {
    pub name: String,
    pub head: RegionId,
    pub index_map: Option<Vec<Option<RegionId>>>,
}

/// A set of pages and the regions cut from them
#[derive(Debug, Clone, Default)]
pub struct TextureAtlasData {
    /// Infer region indices from trailing digits in region names
    pub auto_index: bool,
    /// Directory page image names are resolved against
    pub prefix: Option<PathBuf>,
    /// Set by every successful load; cleared by `load_stamps`
    pub needs_stamps: bool,

    pub pages: Vec<PageData>,
    pub page_names: FxHashMap<String, PageId>,
    pub regions: Vec<RegionData>,
    pub groups: Vec<GroupData>,
    pub group_names: FxHashMap<String, GroupId>,
}

/// Name and index inferred from a region name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub original_name: String,
    pub name: String,
    pub index: Option<u64>,
}
