use approx::assert_relative_eq;
use linvis_algebra::{presets, Dimension, Matrix};
use linvis_scene::{
    transform, Color, Scene, SceneConfig, SourceVector, SyncOutcome, SyncState, VectorId,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn identity_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    for components in [vec![1.5, -2.0], vec![0.0, 3.25, -7.0]] {
        let m = Matrix::identity(components.len())?;
        let v = SourceVector::new(VectorId(1), components.clone(), "v", Color::WHITE)?;
        let derived = transform(&m, &v)?;
        assert_eq!(derived.components(), components.as_slice());
    }
    Ok(())
}

#[test]
fn resync_without_change_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut scene = Scene::default();
    scene.add_source_vector(vec![1.0, 2.0, 3.0])?;
    scene.set_matrix(presets::rotation_3d(&[0.0, 0.0, 1.0], 0.3)?);

    let count = scene.coordinator().recompute_count();
    let derived = scene.derived_vectors().to_vec();

    assert_eq!(scene.resync(), SyncOutcome::Unchanged);
    assert_eq!(scene.resync(), SyncOutcome::Unchanged);
    assert_eq!(scene.coordinator().recompute_count(), count);
    assert_eq!(scene.derived_vectors(), derived.as_slice());
    assert_eq!(scene.coordinator().state(), SyncState::Idle);

    // writing the same value back is not a change either
    let value = scene.matrix().get(0, 0);
    scene.set_matrix_value(0, 0, value)?;
    assert_eq!(scene.coordinator().recompute_count(), count);
    Ok(())
}

#[test]
fn incompatible_vector_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut scene = Scene::new(SceneConfig {
        dimension: Dimension::D2X2,
        ..Default::default()
    });
    let planar = scene.add_source_vector(vec![1.0, 0.0])?;
    let spatial = scene.add_source_vector(vec![1.0, 0.0, 0.0])?;

    assert!(scene.derived_for(planar).is_some());
    assert!(scene.derived_for(spatial).is_none());
    assert_eq!(scene.incompatible().len(), 1);

    let diagnostic = &scene.incompatible()[0];
    assert_eq!(diagnostic.vector_id, spatial);
    assert_eq!(diagnostic.vector_dimension, 3);
    assert_eq!(diagnostic.required_dimension, 2);
    Ok(())
}

#[test]
fn visibility_survives_matrix_change() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut scene = Scene::default();
    let v = scene.add_source_vector(vec![1.0, 0.0, 0.0])?;
    scene.set_visible(v, false)?;
    scene.set_matrix(presets::scale(&[2.0, 2.0, 2.0])?);

    let derived = scene.derived_for(v).ok_or("missing derived vector")?;
    assert!(!derived.is_visible());
    assert_eq!(derived.components(), &[2.0, 0.0, 0.0]);

    scene.set_visible(v, true)?;
    assert!(scene.derived_for(v).is_some_and(|d| d.is_visible()));
    Ok(())
}

#[test]
fn toggling_display_forces_recompute() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut scene = Scene::default();
    scene.add_source_vector(vec![0.0, 1.0, 0.0])?;
    let count = scene.coordinator().recompute_count();

    scene.set_derived_display(false);
    assert!(!scene.show_derived());
    assert!(scene.derived_vectors().is_empty());
    assert_eq!(scene.resync(), SyncOutcome::Disabled);

    scene.set_derived_display(true);
    assert_eq!(scene.coordinator().recompute_count(), count + 1);
    assert_eq!(scene.derived_vectors().len(), 1);
    Ok(())
}

#[test]
fn rotation_moves_every_vector() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let mut scene = Scene::new(SceneConfig {
        dimension: Dimension::D2X2,
        ..Default::default()
    });
    let a = scene.add_source_vector(vec![1.0, 0.0])?;
    let b = scene.add_source_vector(vec![0.0, 2.0])?;
    scene.set_matrix(presets::rotation_2d(std::f64::consts::FRAC_PI_2));

    let da = scene.derived_for(a).ok_or("missing derived vector")?;
    assert_relative_eq!(da.components()[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(da.components()[1], 1.0, epsilon = 1e-12);

    let db = scene.derived_for(b).ok_or("missing derived vector")?;
    assert_relative_eq!(db.components()[0], -2.0, epsilon = 1e-12);
    assert_relative_eq!(db.components()[1], 0.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn snapshot_serializes() -> Result<(), Box<dyn std::error::Error>> {
    let mut scene = Scene::new(SceneConfig {
        dimension: Dimension::new(2, 3)?,
        ..Default::default()
    });
    let v = scene.add_source_vector(vec![1.0, 2.0, 3.0])?;

    let json = serde_json::to_value(scene.derived_for(v).ok_or("missing derived vector")?)?;
    assert_eq!(json["source_id"], 1);
    assert_eq!(json["components"], serde_json::json!([1.0, 2.0]));
    assert_eq!(json["color"], "#1f77b4");
    assert_eq!(json["derived"], true);

    let json = serde_json::to_value(scene.matrix())?;
    assert_eq!(
        json,
        serde_json::json!({ "rows": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] })
    );
    Ok(())
}
