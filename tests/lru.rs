use pagesim::{
    Access,
    EventKind,
    EventRecorder,
    EvictionPolicy,
    FrameId,
    LruMmu,
    Mmu,
    MmuError,
    PageId,
    Policy,
};

fn pages(ids: &[u64]) -> Vec<PageId> {
    ids.iter().copied().map(PageId).collect()
}

#[test]
fn basic_ops() {
    let mut mmu = LruMmu::new(2).unwrap();
    assert_eq!(mmu.capacity(), 2);
    assert_eq!(mmu.policy(), Policy::Lru);

    // Scenario: reads [1,2,3,1,2] over two frames. Every access misses: 3 evicts
    // 1, then 1 evicts 2, then 2 evicts 3.
    for page in [1, 2, 3, 1, 2] {
        mmu.read(PageId(page));
    }
    assert_eq!(mmu.total_page_faults(), 5);
    assert_eq!(mmu.total_disk_reads(), 5);
    assert_eq!(mmu.total_disk_writes(), 0);
    assert_eq!(mmu.resident_pages(), pages(&[1, 2]));
}

#[test]
fn invalid_capacity() {
    assert!(matches!(
        LruMmu::new(0),
        Err(MmuError::InvalidConfiguration(_))
    ));
}

#[test]
fn evicts_least_recently_used() {
    let mut mmu = LruMmu::new(3).unwrap();

    // Scenario: touch k+1 distinct pages, the first one goes.
    for page in [1, 2, 3, 4] {
        mmu.read(PageId(page));
    }
    assert!(!mmu.is_resident(PageId(1)));
    assert_eq!(mmu.resident_pages(), pages(&[2, 3, 4]));
    assert_eq!(mmu.total_page_faults(), 4);

    // Scenario: re-touching 2 protects it, 3 is now the oldest.
    mmu.read(PageId(2));
    mmu.read(PageId(5));
    assert_eq!(mmu.resident_pages(), pages(&[2, 4, 5]));
    assert_eq!(mmu.total_page_faults(), 5);
}

#[test]
fn re_request_within_window_is_a_hit() {
    let mut mmu = LruMmu::new(3).unwrap();

    mmu.read(PageId(1));
    mmu.read(PageId(2));
    mmu.read(PageId(3));
    // Fewer than k other distinct pages since page 1 was last touched.
    mmu.read(PageId(1));
    mmu.read(PageId(4));
    mmu.read(PageId(1));

    assert_eq!(mmu.total_page_faults(), 4);
    assert_eq!(mmu.stats().hits(), 2);
    assert_eq!(mmu.resident_pages(), pages(&[1, 3, 4]));
}

#[test]
fn repeated_touch_single_entry() {
    let mut mmu = LruMmu::new(2).unwrap();
    mmu.read(PageId(1));
    mmu.read(PageId(1));
    mmu.read(PageId(1));
    mmu.read(PageId(2));

    assert_eq!(mmu.replacer().size(), 2);
    assert_eq!(mmu.replacer().recency_order(), vec![FrameId(1), FrameId(0)]);

    // Page 1 is least recently used despite three accesses.
    mmu.read(PageId(3));
    assert_eq!(mmu.resident_pages(), pages(&[2, 3]));
}

#[test]
fn dirty_write_back() {
    let mut mmu = LruMmu::new(3).unwrap();

    // Scenario: three dirty pages, a fourth evicts a dirty victim.
    mmu.write(PageId(1));
    mmu.write(PageId(2));
    mmu.write(PageId(3));
    assert_eq!(mmu.total_disk_writes(), 0);
    mmu.write(PageId(4));
    assert_eq!(mmu.total_page_faults(), 4);
    assert_eq!(mmu.total_disk_reads(), 4);
    assert_eq!(mmu.total_disk_writes(), 1);
}

#[test]
fn write_hit_dirties_clean_page() {
    let mut mmu = LruMmu::new(2).unwrap();

    mmu.read(PageId(1));
    mmu.read(PageId(2));
    mmu.write(PageId(1)); // hit, page 1 becomes dirty and most recent
    mmu.read(PageId(3)); // evicts clean page 2
    assert_eq!(mmu.total_disk_writes(), 0);
    mmu.read(PageId(4)); // evicts dirty page 1
    assert_eq!(mmu.total_disk_writes(), 1);

    // Reloaded by a read, page 1 starts clean.
    mmu.read(PageId(1));
    mmu.read(PageId(5));
    mmu.read(PageId(6));
    assert!(!mmu.is_resident(PageId(1)));
    assert_eq!(mmu.total_disk_writes(), 1);
}

#[test]
fn debug_events() {
    let mut mmu = LruMmu::new(1).unwrap();
    let recorder = EventRecorder::new();
    mmu.set_event_sink(Box::new(recorder.clone()));

    // Nothing is reported until debug mode is on.
    mmu.read(PageId(1));
    assert!(recorder.is_empty());

    mmu.set_debug();
    assert!(mmu.is_debug());
    mmu.read(PageId(1));
    mmu.write(PageId(2));
    assert_eq!(recorder.kinds(), vec![
        EventKind::Hit,
        EventKind::Miss,
        EventKind::Evict { dirty: false },
        EventKind::Load,
    ]);

    let events = recorder.events();
    assert_eq!(events[0].frame, Some(FrameId(0)));
    assert_eq!(events[1].frame, None);
    assert_eq!(events[2].page, PageId(1));
    assert_eq!(events[3].page, PageId(2));
    assert_eq!(events[3].access, Access::Write);

    // Counters are not affected by debug mode.
    mmu.reset_debug();
    mmu.read(PageId(3));
    assert_eq!(recorder.len(), 4);
    assert_eq!(mmu.total_page_faults(), 3);
    assert_eq!(mmu.total_disk_writes(), 1);
}
