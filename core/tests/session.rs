use kakera_core::{
    best_grid, decode, encode, CoreError, DragState, DragTarget, GroupSnapshot, ImageRef,
    MergeOutcome, PuzzleSession, PuzzleSnapshot,
};

fn session_for(image_width: u32, image_height: u32, seed: u32) -> PuzzleSession {
    let spec = best_grid(image_width, image_height).unwrap();
    PuzzleSession::create(
        "abcdefghij",
        ImageRef::BuiltIn {
            slug: "lighthouse".into(),
        },
        image_width,
        image_height,
        spec,
        seed,
    )
}

#[test]
fn drag_and_release_joins_adjacent_pieces() {
    // 200x100 resolves to a 2x1 grid.
    let mut session = session_for(200, 100, 7);
    assert_eq!(session.grid().dimensions().width, 2);
    assert_eq!(session.grid().dimensions().height, 1);

    let target = session.begin_drag(10.0, 10.0).unwrap();
    assert_eq!(target, DragTarget::Group(0));
    session.continue_drag(25.0, 0.0).unwrap();

    let outcome = session.end_drag().unwrap();
    assert_eq!(
        outcome,
        Some(MergeOutcome {
            survivor: 1,
            absorbed: 0
        })
    );
    assert_eq!(session.drag_state(), DragState::Idle);
    assert_eq!(session.workspace().order(), &[1]);
    assert_eq!(session.workspace().group_count(), 1);
    assert!(!session.workspace().order().contains(&0));
}

#[test]
fn hit_test_prefers_the_frontmost_group() {
    let mut session = session_for(200, 100, 7);

    // Drag piece 0 over piece 1: they overlap between x=125 and x=200.
    assert_eq!(session.begin_drag(10.0, 10.0).unwrap(), DragTarget::Group(0));
    session.continue_drag(100.0, 0.0).unwrap();
    assert_eq!(session.end_drag().unwrap(), None);
    assert_eq!(session.hit_test(150.0, 50.0), Some(0));

    // Picking up group 1 raises it above group 0.
    assert_eq!(
        session.begin_drag(220.0, 50.0).unwrap(),
        DragTarget::Group(1)
    );
    session.end_drag().unwrap();
    assert_eq!(session.hit_test(150.0, 50.0), Some(1));
}

#[test]
fn rotation_steps_wrap_after_four_turns() {
    let mut session = session_for(200, 100, 7);
    let target = DragTarget::Group(0);

    session.rotate(target).unwrap();
    assert_eq!(session.workspace().group(0).unwrap().rotation.steps(), 3);
    for _ in 0..3 {
        session.rotate(target).unwrap();
    }
    assert_eq!(session.workspace().group(0).unwrap().rotation.steps(), 0);

    // Rotating the field is a no-op.
    session.rotate(DragTarget::Field).unwrap();
    assert_eq!(session.workspace().group(0).unwrap().rotation.steps(), 0);
}

#[test]
fn empty_space_drag_pans_the_field() {
    let mut session = session_for(200, 100, 7);

    let target = session.begin_drag(2000.0, 2000.0).unwrap();
    assert_eq!(target, DragTarget::Field);
    session.continue_drag(30.0, 40.0).unwrap();
    // Grabbing the background moves the view the opposite way.
    assert_eq!(session.field_offset(), (-30.0, -40.0));
    assert_eq!(session.end_drag().unwrap(), None);
    assert_eq!(session.drag_state(), DragState::Idle);
}

#[test]
fn workspaces_are_independent() {
    let mut session = session_for(200, 100, 7);

    session.begin_drag(10.0, 10.0).unwrap();
    session.continue_drag(25.0, 0.0).unwrap();
    session.end_drag().unwrap();
    assert_eq!(session.workspace().group_count(), 1);

    let sorting = session.add_workspace("sorting");
    session.set_active_workspace(sorting).unwrap();
    assert_eq!(session.workspace().name, "sorting");
    assert_eq!(session.workspace().group_count(), 2);

    session.set_active_workspace(0).unwrap();
    assert_eq!(session.workspace().group_count(), 1);
    assert!(session.set_active_workspace(5).is_err());
}

#[test]
fn snapshot_round_trip_restores_everything() {
    // 400x300 resolves to a 4x3 grid.
    let mut session = session_for(400, 300, 1234);
    assert_eq!(session.grid().piece_count(), 12);

    // Leave some state behind: a merge, a rotation, a pan, a second board.
    session.begin_drag(10.0, 10.0).unwrap();
    session.continue_drag(25.0, 0.0).unwrap();
    assert!(session.end_drag().unwrap().is_some());
    session.rotate(DragTarget::Group(5)).unwrap();
    session.add_workspace("sorting");

    let snapshot = session.snapshot();
    let bytes = encode(&snapshot).unwrap();
    let decoded: PuzzleSnapshot = decode(&bytes).unwrap();
    assert_eq!(decoded, snapshot);

    let restored = kakera_core::PuzzleSession::restore(decoded).unwrap();
    assert_eq!(restored.puzzle().id, session.puzzle().id);
    assert_eq!(restored.puzzle().spec, session.puzzle().spec);
    assert_eq!(restored.puzzle().workspaces, session.puzzle().workspaces);

    // Boundary paths come back bit-identical from the stored outer flags.
    for piece in 0..session.grid().piece_count() {
        assert_eq!(restored.grid().outline(piece), session.grid().outline(piece));
        assert_eq!(restored.grid().sample_rect(piece), session.grid().sample_rect(piece));
    }
}

#[test]
fn snapshot_without_workspaces_is_rejected() {
    let session = session_for(200, 100, 7);
    let mut snapshot = session.snapshot();
    snapshot.workspaces.clear();
    assert!(kakera_core::PuzzleSession::restore(snapshot).is_err());
}

#[test]
fn snapshot_with_missing_pieces_is_rejected() {
    let session = session_for(200, 100, 7);
    let mut snapshot = session.snapshot();
    snapshot.workspaces[0].groups.pop();
    assert!(kakera_core::PuzzleSession::restore(snapshot).is_err());
}

#[test]
fn snapshot_with_empty_group_is_rejected() {
    // Merge so id 0 is retired and free to be forged back in.
    let mut session = session_for(200, 100, 7);
    session.begin_drag(10.0, 10.0).unwrap();
    session.continue_drag(25.0, 0.0).unwrap();
    assert!(session.end_drag().unwrap().is_some());

    let mut snapshot = session.snapshot();
    snapshot.workspaces[0].groups.push(GroupSnapshot {
        id: 0,
        rotation: 0,
        position: (0.0, 0.0),
        pieces: vec![],
    });
    assert!(matches!(
        kakera_core::PuzzleSession::restore(snapshot),
        Err(CoreError::Codec(_))
    ));
}

#[test]
fn snapshot_with_duplicate_group_id_is_rejected() {
    let mut session = session_for(200, 100, 7);
    session.add_workspace("sorting");

    let mut snapshot = session.snapshot();
    // The first workspace's piece-coverage count cannot see a duplicate in
    // a later workspace; the per-workspace rebuild has to.
    let forged = snapshot.workspaces[1].groups[0].clone();
    snapshot.workspaces[1].groups.push(forged);
    assert!(matches!(
        kakera_core::PuzzleSession::restore(snapshot),
        Err(CoreError::Codec(_))
    ));
}
