use pixelscan_core::{DecodePolicy, ErrorKind, ScanConfig, ScanError, Share};
use pixelscan_report::ReportBuilder;
use pixelscan_scan::AreaScanner;
use pixelscan_scan::fixtures::write_png;
use std::fs;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Root with `A/` holding one 10×10 image and `B/` holding one 5×5 image.
fn create_two_folder_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("A")).unwrap();
    fs::create_dir(temp.path().join("B")).unwrap();
    write_png(&temp.path().join("A/hero.png"), 10, 10).unwrap();
    write_png(&temp.path().join("B/coin.png"), 5, 5).unwrap();
    temp
}

fn create_nested_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for dir in ["ui/icons", "ui/panels", "tiles/grass", "tiles/stone", "fx", "docs"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    write_png(&root.join("cover.png"), 64, 32).unwrap();
    write_png(&root.join("ui/icons/close.png"), 16, 16).unwrap();
    write_png(&root.join("ui/icons/open.png"), 16, 16).unwrap();
    write_png(&root.join("ui/panels/frame.png"), 128, 64).unwrap();
    write_png(&root.join("tiles/grass/0.png"), 32, 32).unwrap();
    write_png(&root.join("tiles/stone/0.png"), 32, 32).unwrap();
    write_png(&root.join("tiles/stone/1.png"), 32, 32).unwrap();
    write_png(&root.join("fx/spark.png"), 8, 8).unwrap();
    fs::write(root.join("docs/README.md"), "art notes").unwrap();
    fs::write(root.join("notes.txt"), "todo").unwrap();
    temp
}

#[test]
fn test_two_folder_scenario() {
    let temp = create_two_folder_root();
    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    assert_eq!(report.total_area, 125);
    assert_eq!(report.entries.len(), 2);

    assert_eq!(report.entries[0].name.as_str(), "A");
    assert_eq!(report.entries[0].area, 100);
    assert_eq!(report.entries[0].percentage().round(), 80.0);
    assert_eq!(report.entries[0].share, Share::High);

    assert_eq!(report.entries[1].name.as_str(), "B");
    assert_eq!(report.entries[1].area, 25);
    assert_eq!(report.entries[1].percentage().round(), 20.0);
    // Exactly at the threshold counts as high.
    assert_eq!(report.entries[1].share, Share::High);

    assert_eq!(report.entries_area(), report.total_area);
}

#[test]
fn test_total_includes_direct_files() {
    let temp = create_nested_root();
    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    let expected = 64 * 32 + 2 * 256 + 128 * 64 + 3 * 1024 + 64;
    assert_eq!(report.total_area, expected);
    assert_eq!(report.direct_area(), 64 * 32);
    assert!(report.entries_area() < report.total_area);
    assert_eq!(report.stats.images_measured, 8);
}

#[test]
fn test_additivity_against_scanner() {
    let temp = create_nested_root();
    let report = ReportBuilder::new().build_report(temp.path()).unwrap();
    let scanner = AreaScanner::new();

    for entry in &report.entries {
        let area = scanner.scan(&temp.path().join(entry.name.as_str())).unwrap();
        assert_eq!(entry.area, area);
    }
    assert_eq!(report.entries_area() + 64 * 32, report.total_area);
}

#[test]
fn test_entries_sorted_descending_with_name_ties() {
    let temp = create_nested_root();
    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    for pair in report.entries.windows(2) {
        assert!(pair[0].area >= pair[1].area);
        if pair[0].area == pair[1].area {
            assert!(pair[0].name < pair[1].name);
        }
    }

    let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["ui", "tiles", "fx", "docs"]);
    assert_eq!(report.entries[3].area, 0);
    assert_eq!(report.entries[3].share, Share::Low);
}

#[test]
fn test_single_subdirectory_is_hundred_percent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("only/deep/er")).unwrap();
    write_png(&temp.path().join("only/deep/er/big.png"), 300, 200).unwrap();

    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    assert_eq!(report.total_area, 60_000);
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].percentage(), 100.0);
}

#[test]
fn test_corrupt_image_fails_whole_report() {
    let temp = create_two_folder_root();
    fs::write(temp.path().join("B/corrupt.png"), b"this is not image data").unwrap();

    let err = ReportBuilder::new().build_report(temp.path()).unwrap_err();
    assert!(matches!(err, ScanError::Decode { .. }));
}

#[test]
fn test_corrupt_image_skipped_by_policy() {
    let temp = create_two_folder_root();
    fs::write(temp.path().join("B/corrupt.png"), b"this is not image data").unwrap();
    let config = ScanConfig::builder()
        .decode_policy(DecodePolicy::Skip)
        .build()
        .unwrap();

    let report = ReportBuilder::with_config(config)
        .unwrap()
        .build_report(temp.path())
        .unwrap();

    assert_eq!(report.total_area, 125);
    assert!(report.has_warnings());
    assert_eq!(report.stats.images_skipped, 1);
}

#[test]
fn test_custom_threshold() {
    let temp = create_two_folder_root();
    let config = ScanConfig::builder().high_threshold(0.5).build().unwrap();

    let report = ReportBuilder::with_config(config)
        .unwrap()
        .build_report(temp.path())
        .unwrap();

    assert_eq!(report.entries[0].share, Share::High);
    assert_eq!(report.entries[1].share, Share::Low);
}

#[test]
fn test_batch_roots_are_independent() {
    let good = create_two_folder_root();
    let missing = good.path().join("does-not-exist");
    let file_root = good.path().join("A/hero.png");

    let builder = ReportBuilder::new();
    let outcomes = builder.build_reports(&[good.path().to_path_buf(), missing.clone(), file_root]);

    assert_eq!(outcomes.len(), 3);

    assert!(outcomes[0].is_ok());
    assert_eq!(outcomes[0].report().unwrap().total_area, 125);

    assert_eq!(outcomes[1].root, missing);
    assert_eq!(outcomes[1].error().unwrap().kind(), ErrorKind::Io);

    assert!(matches!(
        outcomes[2].error(),
        Some(ScanError::NotADirectory { .. })
    ));
}

#[test]
fn test_batch_with_bounded_pool() {
    let first = create_two_folder_root();
    let second = create_nested_root();
    let config = ScanConfig::builder().threads(2usize).build().unwrap();

    let builder = ReportBuilder::with_config(config).unwrap();
    let outcomes = builder.build_reports(&[first.path(), second.path()]);

    assert_eq!(outcomes[0].report().unwrap().total_area, 125);
    assert_eq!(outcomes[1].report().unwrap().entries.len(), 4);
}

#[test]
fn test_cancelled_batch() {
    let temp = create_two_folder_root();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let builder = ReportBuilder::new().with_cancellation(cancel);
    let outcomes = builder.build_reports(&[temp.path()]);

    assert!(matches!(outcomes[0].error(), Some(ScanError::Interrupted)));
}

#[cfg(unix)]
#[test]
fn test_link_cycle_fails_with_cycle_error() {
    let temp = create_two_folder_root();
    std::os::unix::fs::symlink(temp.path(), temp.path().join("A/loop")).unwrap();

    let err = ReportBuilder::new().build_report(temp.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cycle);
}

#[cfg(unix)]
#[test]
fn test_link_alias_is_counted_under_both_names() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("A")).unwrap();
    write_png(&temp.path().join("A/x.png"), 10, 10).unwrap();
    std::os::unix::fs::symlink(temp.path().join("A"), temp.path().join("B")).unwrap();

    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    assert_eq!(report.total_area, 200);
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].name.as_str(), "A");
    assert_eq!(report.entries[0].area, 100);
    assert_eq!(report.entries[1].name.as_str(), "B");
    assert_eq!(report.entries[1].area, 100);
}

#[test]
fn test_huge_images_saturate_totals() {
    let temp = TempDir::new().unwrap();
    let side = 0x7fff_ffff_u32;
    for name in ["s0", "s1", "s2", "s3", "s4"] {
        fs::create_dir(temp.path().join(name)).unwrap();
        write_png(&temp.path().join(name).join("big.png"), side, side).unwrap();
    }

    let report = ReportBuilder::new().build_report(temp.path()).unwrap();

    assert_eq!(report.total_area, u64::MAX);
    assert_eq!(report.entries.len(), 5);
    assert!(
        report
            .entries
            .iter()
            .all(|entry| entry.area == u64::from(side) * u64::from(side))
    );
    assert_eq!(report.entries_area(), u64::MAX);
    assert_eq!(report.direct_area(), 0);
}

#[test]
fn test_builder_progress_updates() {
    let temp = create_two_folder_root();
    let builder = ReportBuilder::new();
    let mut rx = builder.subscribe();

    builder.build_report(temp.path()).unwrap();

    let mut updates = Vec::new();
    while let Ok(progress) = rx.try_recv() {
        updates.push(progress);
    }

    // One final update from the root walk and one from each child walk.
    assert_eq!(updates.len(), 3);
    let root = updates
        .iter()
        .find(|progress| progress.pixels_counted == 125)
        .unwrap();
    assert_eq!(root.images_measured, 2);
    assert_eq!(root.dirs_scanned, 3);
    assert_eq!(root.current_path, temp.path().canonicalize().unwrap());
    assert!(updates.iter().any(|progress| progress.pixels_counted == 100));
    assert!(updates.iter().any(|progress| progress.pixels_counted == 25));
}

#[test]
fn test_cancel_during_walk() {
    let temp = TempDir::new().unwrap();
    for d in 0..64 {
        let dir = temp.path().join(format!("bulk/d{d:02}"));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..64 {
            write_png(&dir.join(format!("{f}.png")), 1, 1).unwrap();
        }
    }

    let cancel = CancellationToken::new();
    let builder = ReportBuilder::new().with_cancellation(cancel.clone());
    let mut rx = builder.subscribe();

    // Cancel as soon as the first walk reports progress.
    let canceller = std::thread::spawn(move || {
        let first = rx.blocking_recv().unwrap();
        cancel.cancel();
        first
    });

    let err = builder.build_report(temp.path()).unwrap_err();
    let first = canceller.join().unwrap();

    assert!(matches!(err, ScanError::Interrupted));
    assert!(first.files_visited < 64 * 64);
}
