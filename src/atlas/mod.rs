//! Texture Atlas Module
//!
//! Reads Spine-style atlas text (pages, each followed by named regions)
//! and turns every region into a stamp on its page's texture. Regions that
//! share a name form an indexed group, addressable by frame number with
//! wraparound, which is how animations are usually stored.

pub mod atlas_data;
pub mod atlas_operations;
pub mod atlas_parser;
pub mod error;
pub mod page_source;

#[cfg(test)]
mod tests;

pub use atlas_data::{
    FrameInfo, GroupData, GroupId, Lrtb, PageData, PageId, RegionData, RegionId,
    TextureAtlasData,
};
pub use atlas_operations::{
    create_atlas, get, get_frame, get_indexed, group_len, is_indexed, load_atlas,
    load_atlas_data, load_atlas_file, load_stamps, nine_patch, nine_patch_part, page, region,
    remove_empty_indices, stamps_of,
};
pub use atlas_parser::{frame_info, strip_ext};
pub use error::{AtlasError, AtlasResult};
pub use page_source::{FilePageSource, PageSource};
