//! Atlas loading and region resolution

use std::path::Path;

use super::*;
use crate::device::HeadlessDevice;
use crate::error::{EngineError, EngineResult};
use crate::pixels::{self, PixelsData};
use crate::texture::{TextureFilter, TextureWrap};

/// Serves blank pixels sized from the page header and remembers requests
#[derive(Default)]
struct MemoryPages {
    loads: Vec<String>,
}

impl PageSource for MemoryPages {
    fn load_pixels(&mut self, _prefix: Option<&Path>, page: &PageData) -> EngineResult<PixelsData> {
        self.loads.push(page.name.clone());
        Ok(pixels::create_pixels(page.width, page.height))
    }
}

const HERO: &str = "\
hero.png
size: 64,32
format: RGBA8888
filter: Linear,Linear
repeat: none
walk00
  bounds: 0,0,16,16
walk01
  bounds: 16,0,16,16
walk02.png
  bounds: 32,0,16,16
  rotate: 90
sign
  bounds: 48,0,16,32
  split: 4,4,2,2
";

fn loaded(text: &str, auto_index: bool) -> (TextureAtlasData, HeadlessDevice) {
    let mut atlas = create_atlas(auto_index);
    let mut device = HeadlessDevice::new();
    load_atlas_data(&mut atlas, text).unwrap();
    load_stamps(&mut atlas, &mut device, &mut MemoryPages::default(), None).unwrap();
    (atlas, device)
}

fn atlas_error(result: EngineResult<()>) -> AtlasError {
    match result {
        Err(EngineError::Atlas(error)) => error,
        other => panic!("expected an atlas error, got {:?}", other),
    }
}

#[test]
fn test_page_header_fields() {
    let mut atlas = create_atlas(false);
    load_atlas_data(
        &mut atlas,
        "sheet.png\nsize: 256,128\nfilter: linear,nearest\nrepeat: x\n",
    )
    .unwrap();

    let p = page(&atlas, "sheet.png").unwrap();
    assert_eq!((p.width, p.height), (256, 128));
    assert_eq!(p.min_filter, TextureFilter::Linear);
    assert_eq!(p.mag_filter, TextureFilter::Nearest);
    assert!(p.repeat_x);
    assert!(!p.repeat_y);
    assert_eq!(p.pixel_format, "RGBA8888");
    assert!(!p.premultiplied_alpha);
}

#[test]
fn test_auto_index_groups_regions() {
    let (atlas, _) = loaded(HERO, true);

    assert!(is_indexed(&atlas, "walk"));
    assert!(!is_indexed(&atlas, "sign"));
    assert_eq!(group_len(&atlas, "walk"), 3);

    let walk2 = get_indexed(&atlas, "walk", 2).unwrap();
    assert_eq!(walk2.name, "walk");
    assert_eq!(walk2.index, Some(2));
    assert_eq!(walk2.x, 32);

    // every member shares the head's group
    let head = get(&atlas, "walk").unwrap();
    assert_eq!(head.index, Some(0));
    assert_eq!(walk2.group, head.group);
}

#[test]
fn test_indexed_lookup_wraps() {
    let (atlas, _) = loaded(HERO, true);
    let n = group_len(&atlas, "walk");
    for i in 0..n {
        let first = get_indexed(&atlas, "walk", i).unwrap();
        for k in 1..4 {
            let wrapped = get_indexed(&atlas, "walk", i + k * n).unwrap();
            assert_eq!(first.id, wrapped.id);
        }
    }

    // an unindexed region acts as a group of one
    assert_eq!(
        get_indexed(&atlas, "sign", 5).map(|r| r.id),
        get(&atlas, "sign").map(|r| r.id)
    );
    assert!(get_indexed(&atlas, "missing", 0).is_none());
}

#[test]
fn test_auto_index_agreement() {
    let mut atlas = create_atlas(true);
    load_atlas_data(&mut atlas, "p.png\nsize: 8,8\nwalk07\nbounds: 0,0,1,1\n").unwrap();
    let r = get(&atlas, "walk").unwrap();
    assert_eq!(r.index, Some(7));

    let mut atlas = create_atlas(true);
    load_atlas_data(
        &mut atlas,
        "p.png\nsize: 8,8\nwalk07\nbounds: 0,0,1,1\nindex: 7\n",
    )
    .unwrap();
    assert_eq!(get(&atlas, "walk").unwrap().index, Some(7));

    let mut atlas = create_atlas(true);
    let err = atlas_error(load_atlas_data(
        &mut atlas,
        "p.png\nsize: 8,8\nwalk07\nbounds: 0,0,1,1\nindex: 3\n",
    ));
    assert_eq!(
        err,
        AtlasError::IndexMismatch {
            name: "walk".to_string(),
            auto: 7,
            explicit: 3,
        }
    );
}

#[test]
fn test_explicit_index_without_auto_index() {
    let text = "p.png\nsize: 8,8\nrun\nbounds: 0,0,1,1\nindex: 1\nrun\nbounds: 1,0,1,1\nindex: 0\n";
    let (atlas, _) = loaded(text, false);
    assert_eq!(group_len(&atlas, "run"), 2);
    assert_eq!(get_indexed(&atlas, "run", 0).unwrap().x, 1);
    // first seen stays the head even though it has the larger index
    assert_eq!(get(&atlas, "run").unwrap().x, 0);
}

#[test]
fn test_group_errors() {
    let mut atlas = create_atlas(false);
    let err = atlas_error(load_atlas_data(
        &mut atlas,
        "p.png\nsize: 8,8\nrun\nbounds: 0,0,1,1\nrun\nbounds: 0,0,1,1\n",
    ));
    assert_eq!(
        err,
        AtlasError::GroupWithoutIndex {
            name: "run".to_string()
        }
    );

    let err = atlas_error(load_atlas_data(
        &mut atlas,
        "p.png\nsize: 8,8\nrun\nbounds: 0,0,1,1\nindex: 2\nrun\nbounds: 0,0,1,1\nindex: 2\n",
    ));
    assert_eq!(
        err,
        AtlasError::DuplicateIndex {
            name: "run".to_string(),
            index: 2
        }
    );

    let err = atlas_error(load_atlas_data(
        &mut atlas,
        "p.png\nsize: 8,8\nrun\nbounds: 0,0,1,1\nindex: 70000\n",
    ));
    assert!(matches!(err, AtlasError::IndexTooLarge { index: 70000, .. }));
}

#[test]
fn test_duplicate_page_and_rollback() {
    let mut atlas = create_atlas(true);
    load_atlas_data(&mut atlas, HERO).unwrap();
    let regions = atlas.regions.len();

    let err = atlas_error(load_atlas_data(
        &mut atlas,
        "other.png\nsize: 8,8\nwalk03\nbounds: 0,0,1,1\n\nhero.png\nsize: 1,1\n",
    ));
    assert_eq!(
        err,
        AtlasError::DuplicatePage {
            name: "hero.png".to_string()
        }
    );
    // nothing from the failed text was merged
    assert_eq!(atlas.regions.len(), regions);
    assert!(page(&atlas, "other.png").is_none());
    assert_eq!(group_len(&atlas, "walk"), 3);
}

#[test]
fn test_parse_errors_surface() {
    let mut atlas = create_atlas(false);
    assert!(matches!(
        atlas_error(load_atlas_data(&mut atlas, "p.png\nfilter: bicubic\n")),
        AtlasError::UnknownFilter { .. }
    ));
    assert!(matches!(
        atlas_error(load_atlas_data(&mut atlas, "p.png\nsize: 8,8\nr\nrotate: true\n")),
        AtlasError::MissingKey { .. }
    ));
    assert!(matches!(
        atlas_error(load_atlas_data(&mut atlas, "p.png\nsize: 8,8\nsize: 8,8\n")),
        AtlasError::DuplicateKey { .. }
    ));
}

#[test]
fn test_stamps_built_from_bounds() {
    let (atlas, device) = loaded(HERO, true);
    assert_eq!(device.calls.len(), 1);

    let s = get_frame(&atlas, "walk", 1).unwrap();
    assert_eq!((s.u0, s.v0, s.u1, s.v1), (0.25, 0.0, 0.5, 0.5));
    assert_eq!(s.size.x, 16.0);
    assert_eq!(s.orig_size.y, 16.0);
    assert_eq!(s.pin.x, 0.0);
    assert_eq!(s.angle, 0.0);

    let rotated = get_frame(&atlas, "walk", 2).unwrap();
    assert!((rotated.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    let texture = page(&atlas, "hero.png").unwrap().texture.as_ref().unwrap();
    assert_eq!(texture.settings.min_filter, TextureFilter::Linear);
    assert_eq!(texture.settings.wrap_s, TextureWrap::ClampToEdge);
    assert!(std::sync::Arc::ptr_eq(&s.texture, texture));

    let frames = stamps_of(&atlas, "walk");
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[2].u0, 0.5);
    assert_eq!(stamps_of(&atlas, "sign").len(), 1);
    assert!(stamps_of(&atlas, "nobody").is_empty());
}

#[test]
fn test_load_stamps_only_after_new_data() {
    let mut atlas = create_atlas(true);
    let mut device = HeadlessDevice::new();
    let mut pages = MemoryPages::default();

    load_atlas_data(&mut atlas, HERO).unwrap();
    load_stamps(&mut atlas, &mut device, &mut pages, None).unwrap();
    load_stamps(&mut atlas, &mut device, &mut pages, None).unwrap();
    assert_eq!(pages.loads, vec!["hero.png".to_string()]);
    assert!(!atlas.needs_stamps);

    load_atlas_data(
        &mut atlas,
        "more.png\nsize: 8,8\nwalk03\nbounds: 0,0,8,8\n",
    )
    .unwrap();
    assert!(atlas.needs_stamps);
    let before = get_frame(&atlas, "walk", 0).unwrap().clone();

    load_stamps(&mut atlas, &mut device, &mut pages, None).unwrap();
    assert_eq!(pages.loads.len(), 2);
    assert_eq!(device.calls.len(), 2);

    // existing stamps are kept, the new sibling joins the old group
    assert_eq!(get_frame(&atlas, "walk", 0).unwrap(), &before);
    assert_eq!(group_len(&atlas, "walk"), 4);
    assert_eq!(get_frame(&atlas, "walk", 3).unwrap().size.x, 8.0);
}

#[test]
fn test_page_pixels_released_after_upload() {
    let (mut atlas, _) = loaded(HERO, true);
    assert!(atlas.pages[0].pixels.is_none());
    assert!(atlas.pages[0].texture.is_some());

    // merging after stamps exist only stages page metadata
    load_atlas_data(&mut atlas, "more.png\nsize: 8,8\nwalk03\nbounds: 0,0,8,8\n").unwrap();
    assert!(atlas.pages.iter().all(|page| page.pixels.is_none()));
}

#[test]
fn test_failed_upload_keeps_pixels_for_retry() {
    let mut atlas = create_atlas(true);
    let mut device = HeadlessDevice::new();
    let mut pages = MemoryPages::default();
    load_atlas_data(&mut atlas, HERO).unwrap();

    device.fail_uploads_over = Some(32);
    let result = load_stamps(&mut atlas, &mut device, &mut pages, None);
    assert!(matches!(result, Err(EngineError::DeviceError { .. })));
    assert!(atlas.pages[0].pixels.is_some());
    assert!(atlas.pages[0].texture.is_none());
    assert!(atlas.needs_stamps);

    device.fail_uploads_over = None;
    load_stamps(&mut atlas, &mut device, &mut pages, None).unwrap();
    assert_eq!(pages.loads, vec!["hero.png".to_string()]);
    assert!(atlas.pages[0].pixels.is_none());
    assert!(get(&atlas, "sign").unwrap().stamp.is_some());
}

#[test]
fn test_remove_empty_indices() {
    let text = "\
p.png
size: 8,8
idle1
bounds: 1,0,1,1
idle3
bounds: 3,0,1,1
idle4
bounds: 4,0,1,1
";
    let (mut atlas, _) = loaded(text, true);
    assert_eq!(group_len(&atlas, "idle"), 5);
    assert!(get_indexed(&atlas, "idle", 0).is_none());

    remove_empty_indices(&mut atlas);
    assert_eq!(group_len(&atlas, "idle"), 3);
    let xs: Vec<i32> = (0..3)
        .map(|i| get_indexed(&atlas, "idle", i).unwrap().x)
        .collect();
    assert_eq!(xs, vec![1, 3, 4]);
    for i in 0..3 {
        assert_eq!(get_indexed(&atlas, "idle", i).unwrap().index, Some(i as u32));
    }
}

#[test]
fn test_legacy_keys() {
    let text = "\
p.png
size: 100,100
old
  rotate: false
  xy: 10, 20
  size: 30, 40
  orig: 32, 44
  offset: 1, 2
  index: -1
";
    let (atlas, _) = loaded(text, false);
    let r = get(&atlas, "old").unwrap();
    assert_eq!((r.x, r.y, r.w, r.h), (10, 20, 30, 40));
    assert_eq!((r.off_x, r.off_y, r.orig_w, r.orig_h), (1, 2, 32, 44));
    assert_eq!(r.index, None);
    assert!(!is_indexed(&atlas, "old"));
}

#[test]
fn test_offsets_default_to_bounds() {
    let (atlas, _) = loaded(HERO, true);
    let r = get(&atlas, "sign").unwrap();
    assert_eq!((r.off_x, r.off_y, r.orig_w, r.orig_h), (48, 0, 16, 32));
}

#[test]
fn test_nine_patch_parts() {
    let (atlas, _) = loaded(HERO, true);
    let parts = nine_patch(&atlas, "sign").unwrap();
    assert_eq!(parts.len(), 9);

    let center = nine_patch_part(parts, 1, 1).unwrap();
    assert_eq!(center.size.x, 8.0);
    assert_eq!(center.size.y, 28.0);
    assert_eq!(center.u0, 52.0 / 64.0);

    let corner = nine_patch_part(parts, 2, 2).unwrap();
    assert_eq!(corner.u0, 60.0 / 64.0);
    assert_eq!(corner.v0, 30.0 / 32.0);
    assert!(nine_patch_part(parts, 3, 0).is_none());

    assert!(nine_patch(&atlas, "walk").is_none());
}

#[test]
fn test_load_atlas_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::new(64, 32)
        .save(dir.path().join("hero.png"))
        .unwrap();
    let atlas_path = dir.path().join("hero.atlas");
    std::fs::write(&atlas_path, HERO).unwrap();

    let mut atlas = create_atlas(true);
    let mut device = HeadlessDevice::new();
    load_atlas(&mut atlas, &mut device, &mut FilePageSource, &atlas_path).unwrap();

    assert_eq!(atlas.prefix.as_deref(), Some(dir.path()));
    let texture = page(&atlas, "hero.png").unwrap().texture.as_ref().unwrap();
    assert_eq!((texture.width, texture.height), (64, 32));
    assert_eq!(stamps_of(&atlas, "walk").len(), 3);
}

#[test]
fn test_missing_page_image_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut atlas = create_atlas(false);
    let mut device = HeadlessDevice::new();
    load_atlas_data(&mut atlas, "gone.png\nsize: 4,4\n").unwrap();

    let result = load_stamps(&mut atlas, &mut device, &mut FilePageSource, Some(dir.path()));
    assert!(matches!(result, Err(EngineError::IoError { .. })));
    assert!(atlas.needs_stamps);
}

#[test]
fn test_missing_atlas_file() {
    let mut atlas = create_atlas(false);
    let result = load_atlas_file(&mut atlas, Path::new("/no/such/file.atlas"), true);
    assert!(matches!(result, Err(EngineError::IoError { .. })));
    assert!(atlas.prefix.is_none());
}
