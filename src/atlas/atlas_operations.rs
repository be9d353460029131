//! Texture Atlas Operations - Pure DOP Functions
//!
//! Loading is two-phase: `load_atlas_data` parses text and links regions
//! into groups; `load_stamps` later uploads page images and builds one
//! stamp per region. Any number of atlas texts may be merged into one atlas
//! before (or between) stamp loads.

use std::path::Path;

use super::atlas_data::{
    GroupData, GroupId, Lrtb, PageData, PageId, RegionData, RegionId, TextureAtlasData,
};
use super::atlas_parser::{
    frame_info, get_int, get_ints, get_lrtb, get_str, get_bool, parse_blocks, parse_filters,
    parse_rotation, strip_ext, KvBlock, PageBlock,
};
use super::error::{AtlasError, AtlasResult};
use super::page_source::PageSource;
use crate::constants::MAX_REGION_INDEX;
use crate::device::RenderDevice;
use crate::error::{io_error, EngineError, EngineResult, OptionExt};
use crate::stamp::{create_region_stamp, StampData};
use crate::texture::{create_texture, Texture, TextureFilter, TextureSettings, TextureWrap};

/// Create an empty atlas
pub fn create_atlas(auto_index: bool) -> TextureAtlasData {
    TextureAtlasData {
        auto_index,
        ..Default::default()
    }
}

/// Parse atlas text and merge its pages and regions into the atlas.
///
/// All-or-nothing: on error the atlas is left exactly as it was.
pub fn load_atlas_data(atlas: &mut TextureAtlasData, text: &str) -> EngineResult<()> {
    let blocks = parse_blocks(text)?;

    let mut staged = atlas.clone();
    for block in &blocks {
        add_page(&mut staged, block)?;
    }
    staged.needs_stamps = true;

    log::info!(
        "[atlas_operations::load_atlas_data] Loaded {} pages; atlas now has {} pages, {} regions",
        blocks.len(),
        staged.pages.len(),
        staged.regions.len()
    );

    *atlas = staged;
    Ok(())
}

/// Read an atlas file and merge it in.
///
/// With `set_prefix`, the file's directory becomes the prefix page images
/// are loaded from.
pub fn load_atlas_file(
    atlas: &mut TextureAtlasData,
    path: &Path,
    set_prefix: bool,
) -> EngineResult<()> {
    log::debug!(
        "[atlas_operations::load_atlas_file] Reading {}",
        path.display()
    );
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    load_atlas_data(atlas, &text)?;

    if set_prefix {
        atlas.prefix = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }
    Ok(())
}

/// Load an atlas file and build its stamps in one go
pub fn load_atlas(
    atlas: &mut TextureAtlasData,
    device: &mut dyn RenderDevice,
    source: &mut dyn PageSource,
    path: &Path,
) -> EngineResult<()> {
    load_atlas_file(atlas, path, true)?;
    load_stamps(atlas, device, source, None)
}

/// Upload page images and build stamps for every region that lacks one.
///
/// Does nothing unless atlas data was loaded since the last call. `prefix`
/// overrides the atlas prefix for this call. Pages already holding a
/// texture are skipped, and a page's pixels are released after upload, so
/// merging more atlas data later never copies decoded images. A call that
/// fails part way can simply be retried.
pub fn load_stamps(
    atlas: &mut TextureAtlasData,
    device: &mut dyn RenderDevice,
    source: &mut dyn PageSource,
    prefix: Option<&Path>,
) -> EngineResult<()> {
    if !atlas.needs_stamps {
        return Ok(());
    }

    let prefix = prefix.map(Path::to_path_buf).or_else(|| atlas.prefix.clone());

    for page in &mut atlas.pages {
        if page.texture.is_some() {
            continue;
        }
        let pixels = match page.pixels.take() {
            Some(pixels) => pixels,
            None => source.load_pixels(prefix.as_deref(), page)?,
        };
        // pixels are dropped once uploaded; kept for a retry if the upload fails
        match create_texture(device, &pixels, page_settings(page)) {
            Ok(texture) => page.texture = Some(texture),
            Err(e) => {
                page.pixels = Some(pixels);
                return Err(e);
            }
        }
    }

    let pages = &atlas.pages;
    let mut built = 0;
    for region in atlas.regions.iter_mut() {
        if region.stamp.is_some() {
            continue;
        }
        let texture = pages[region.page.0]
            .texture
            .as_ref()
            .ok_or_engine(|| EngineError::ResourceNotFound {
                resource_type: "page texture".to_string(),
                id: pages[region.page.0].name.clone(),
            })?;

        region.nine = region
            .split
            .map(|split| nine_patch_stamps(region, texture, split));
        region.stamp = Some(region_stamp(region, texture));
        built += 1;
    }

    atlas.needs_stamps = false;
    log::info!(
        "[atlas_operations::load_stamps] Built {} stamps across {} pages",
        built,
        atlas.pages.len()
    );
    Ok(())
}

/// Head region of the named group
pub fn get<'a>(atlas: &'a TextureAtlasData, name: &str) -> Option<&'a RegionData> {
    let group = group_of(atlas, name)?;
    Some(&atlas.regions[group.head.0])
}

/// Member of the named group at `index`, wrapping modulo the group size.
///
/// An unindexed region behaves as a group of one. Returns `None` for an
/// unknown name or an empty slot in a sparse group.
pub fn get_indexed<'a>(
    atlas: &'a TextureAtlasData,
    name: &str,
    index: usize,
) -> Option<&'a RegionData> {
    let group = group_of(atlas, name)?;
    let id = match &group.index_map {
        None => group.head,
        Some(map) if map.is_empty() => return None,
        Some(map) => map[index % map.len()]?,
    };
    Some(&atlas.regions[id.0])
}

/// Stamp of the member at `index`; see `get_indexed`
pub fn get_frame<'a>(
    atlas: &'a TextureAtlasData,
    name: &str,
    index: usize,
) -> Option<&'a StampData> {
    get_indexed(atlas, name, index)?.stamp.as_ref()
}

pub fn region(atlas: &TextureAtlasData, id: RegionId) -> &RegionData {
    &atlas.regions[id.0]
}

pub fn page<'a>(atlas: &'a TextureAtlasData, name: &str) -> Option<&'a PageData> {
    atlas.page_names.get(name).map(|id| &atlas.pages[id.0])
}

pub fn is_indexed(atlas: &TextureAtlasData, name: &str) -> bool {
    group_of(atlas, name).is_some_and(|group| group.index_map.is_some())
}

/// Number of index slots in the named group, gaps included
pub fn group_len(atlas: &TextureAtlasData, name: &str) -> usize {
    match group_of(atlas, name) {
        Some(GroupData {
            index_map: Some(map),
            ..
        }) => map.len(),
        Some(_) => 1,
        None => 0,
    }
}

/// Built stamps of the named group in index order, skipping gaps
pub fn stamps_of<'a>(atlas: &'a TextureAtlasData, name: &str) -> Vec<&'a StampData> {
    let Some(group) = group_of(atlas, name) else {
        return Vec::new();
    };
    match &group.index_map {
        None => atlas.regions[group.head.0].stamp.iter().collect(),
        Some(map) => map
            .iter()
            .flatten()
            .filter_map(|id| atlas.regions[id.0].stamp.as_ref())
            .collect(),
    }
}

/// The nine parts of a region that declares `split`, indexed `x + y * 3`
pub fn nine_patch<'a>(atlas: &'a TextureAtlasData, name: &str) -> Option<&'a [StampData]> {
    get(atlas, name)?.nine.as_deref()
}

/// One part of a nine patch; `x` and `y` run 0 through 2
pub fn nine_patch_part(parts: &[StampData], x: usize, y: usize) -> Option<&StampData> {
    if x > 2 || y > 2 {
        return None;
    }
    parts.get(x + y * 3)
}

/// Drop gaps from every indexed group and renumber members from 0,
/// preserving their order
pub fn remove_empty_indices(atlas: &mut TextureAtlasData) {
    let regions = &mut atlas.regions;
    for group in atlas.groups.iter_mut() {
        if let Some(map) = &mut group.index_map {
            map.retain(Option::is_some);
            for (i, id) in map.iter().flatten().enumerate() {
                regions[id.0].index = Some(i as u32);
            }
        }
    }
}

fn group_of<'a>(atlas: &'a TextureAtlasData, name: &str) -> Option<&'a GroupData> {
    atlas.group_names.get(name).map(|id| &atlas.groups[id.0])
}

fn add_page(atlas: &mut TextureAtlasData, block: &PageBlock) -> AtlasResult<()> {
    let name = block.page.name.clone();
    if atlas.page_names.contains_key(&name) {
        return Err(AtlasError::DuplicatePage { name });
    }

    let page = parse_page(&block.page)?;
    let id = PageId(atlas.pages.len());
    atlas.pages.push(page);
    atlas.page_names.insert(name, id);

    for region in &block.regions {
        add_region(atlas, id, region)?;
    }
    Ok(())
}

fn parse_page(block: &KvBlock) -> AtlasResult<PageData> {
    let size = get_ints(block, "size")?.unwrap_or_default();

    let (min_filter, mag_filter) = match get_str(block, "filter") {
        Some(value) if !value.trim().is_empty() => parse_filters(value)?,
        _ => (TextureFilter::Nearest, TextureFilter::Nearest),
    };

    let repeat = get_str(block, "repeat").unwrap_or("").to_lowercase();

    Ok(PageData {
        name: block.name.clone(),
        width: nth(&size, 0).max(0) as u32,
        height: nth(&size, 1).max(0) as u32,
        pixel_format: get_str(block, "format").unwrap_or("RGBA8888").to_string(),
        min_filter,
        mag_filter,
        repeat_x: repeat.contains('x'),
        repeat_y: repeat.contains('y'),
        premultiplied_alpha: get_bool(block, "pma", false),
        pixels: None,
        texture: None,
    })
}

fn add_region(atlas: &mut TextureAtlasData, page: PageId, block: &KvBlock) -> AtlasResult<()> {
    let mut name = strip_ext(&block.name).to_string();
    let mut inferred = None;
    if atlas.auto_index {
        let info = frame_info(&name);
        name = info.name;
        inferred = info.index;
    }

    // negative explicit indices mean "no index"
    let explicit = get_int(block, "index")?
        .filter(|i| *i >= 0)
        .map(|i| i as u64);

    let index = match (inferred, explicit) {
        (Some(auto), Some(explicit)) if auto != explicit => {
            return Err(AtlasError::IndexMismatch {
                name,
                auto,
                explicit,
            })
        }
        (auto, explicit) => auto.or(explicit),
    };
    let index = match index {
        Some(i) if i > MAX_REGION_INDEX as u64 => {
            return Err(AtlasError::IndexTooLarge {
                name,
                index: i,
                max: MAX_REGION_INDEX,
            })
        }
        other => other.map(|i| i as u32),
    };

    let (x, y, w, h) = match get_ints(block, "bounds")? {
        Some(b) => (nth(&b, 0), nth(&b, 1), nth(&b, 2), nth(&b, 3)),
        None => match (get_ints(block, "xy")?, get_ints(block, "size")?) {
            (Some(xy), Some(size)) => (nth(&xy, 0), nth(&xy, 1), nth(&size, 0), nth(&size, 1)),
            _ => {
                return Err(AtlasError::MissingKey {
                    block: block.name.clone(),
                    key: "bounds".to_string(),
                })
            }
        },
    };

    let (mut off_x, mut off_y, mut orig_w, mut orig_h) = (x, y, w, h);
    match get_ints(block, "offsets")? {
        Some(o) => {
            off_x = o.first().copied().unwrap_or(off_x);
            off_y = o.get(1).copied().unwrap_or(off_y);
            orig_w = o.get(2).copied().unwrap_or(orig_w);
            orig_h = o.get(3).copied().unwrap_or(orig_h);
        }
        None => {
            if let Some(o) = get_ints(block, "offset")? {
                off_x = o.first().copied().unwrap_or(off_x);
                off_y = o.get(1).copied().unwrap_or(off_y);
            }
            if let Some(o) = get_ints(block, "orig")? {
                orig_w = o.first().copied().unwrap_or(orig_w);
                orig_h = o.get(1).copied().unwrap_or(orig_h);
            }
        }
    }

    let id = RegionId(atlas.regions.len());
    let group = match atlas.group_names.get(&name) {
        Some(&group) => group,
        None => {
            let group = GroupId(atlas.groups.len());
            atlas.groups.push(GroupData {
                name: name.clone(),
                head: id,
                index_map: None,
            });
            atlas.group_names.insert(name.clone(), group);
            group
        }
    };
    link_into_group(atlas, group, id, index, &name)?;

    log::trace!(
        "[atlas_operations::add_region] {} #{:?} on page {}",
        name,
        index,
        page.0
    );

    atlas.regions.push(RegionData {
        id,
        name,
        index,
        page,
        group,
        x,
        y,
        w,
        h,
        off_x,
        off_y,
        orig_w,
        orig_h,
        rotate: get_str(block, "rotate").map(parse_rotation).unwrap_or(0.0),
        split: get_lrtb(block, "split")?,
        pad: get_lrtb(block, "pad")?,
        stamp: None,
        nine: None,
    });
    Ok(())
}

/// Record `id` in its group's index map. Every member of a group with more
/// than one region must carry a distinct index.
fn link_into_group(
    atlas: &mut TextureAtlasData,
    group: GroupId,
    id: RegionId,
    index: Option<u32>,
    name: &str,
) -> AtlasResult<()> {
    let head = atlas.groups[group.0].head;
    let head_indexed = head == id || atlas.regions[head.0].index.is_some();

    let Some(index) = index else {
        if head == id {
            return Ok(());
        }
        return Err(AtlasError::GroupWithoutIndex {
            name: name.to_string(),
        });
    };
    if !head_indexed {
        return Err(AtlasError::GroupWithoutIndex {
            name: name.to_string(),
        });
    }

    let map = atlas.groups[group.0].index_map.get_or_insert_with(Vec::new);
    let slot = index as usize;
    if map.len() <= slot {
        map.resize(slot + 1, None);
    }
    if map[slot].is_some() {
        return Err(AtlasError::DuplicateIndex {
            name: name.to_string(),
            index,
        });
    }
    map[slot] = Some(id);
    Ok(())
}

fn nth(values: &[i32], i: usize) -> i32 {
    values.get(i).copied().unwrap_or(0)
}

fn page_settings(page: &PageData) -> TextureSettings {
    let wrap = |repeat: bool| {
        if repeat {
            TextureWrap::Repeat
        } else {
            TextureWrap::ClampToEdge
        }
    };
    TextureSettings {
        wrap_s: wrap(page.repeat_x),
        wrap_t: wrap(page.repeat_y),
        min_filter: page.min_filter,
        mag_filter: page.mag_filter,
    }
}

/// Stamp for a region: UVs from its bounds, pin at the origin, and the
/// packer's rotation carried as the drawn angle
fn region_stamp(region: &RegionData, texture: &Texture) -> StampData {
    let mut stamp = create_region_stamp(
        texture,
        region.x as f32,
        region.y as f32,
        region.w as f32,
        region.h as f32,
    );
    stamp.angle = region.rotate;
    stamp
}

fn nine_patch_stamps(region: &RegionData, texture: &Texture, split: Lrtb) -> Vec<StampData> {
    let cols = [
        (0, split.left),
        (split.left, region.w - split.left - split.right),
        (region.w - split.right, split.right),
    ];
    let rows = [
        (0, split.top),
        (split.top, region.h - split.top - split.bottom),
        (region.h - split.bottom, split.bottom),
    ];

    let mut parts = Vec::with_capacity(9);
    for &(py, ph) in &rows {
        for &(px, pw) in &cols {
            parts.push(create_region_stamp(
                texture,
                (region.x + px) as f32,
                (region.y + py) as f32,
                pw.max(0) as f32,
                ph.max(0) as f32,
            ));
        }
    }
    parts
}
