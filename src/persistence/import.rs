//! Area import: read `.enum` files off the main thread and add their rings
//! to the session as history.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::area::{import, read_area_file, AreaError, CoordinateTransform, EditorSession};
use crate::editor::AreaEditor;

use super::messages::ImportAreasRequest;
use super::resources::{AreaImportError, AsyncImportOperation, ImportAreasTask, ImportedFile};

/// Reads and decodes every file in order. A bad file fails on its own.
pub fn read_areas(paths: Vec<PathBuf>, transform: CoordinateTransform) -> Vec<ImportedFile> {
    paths
        .into_iter()
        .map(|path| {
            let ring = read_area_file(&path).and_then(|record| import(&record, &transform));
            ImportedFile { path, ring }
        })
        .collect()
}

/// Starts an async import of the requested files
pub fn import_areas_system(
    mut commands: Commands,
    mut events: MessageReader<ImportAreasRequest>,
    editor: Res<AreaEditor>,
    mut async_op: ResMut<AsyncImportOperation>,
    mut import_error: ResMut<AreaImportError>,
) {
    for event in events.read() {
        if async_op.is_importing {
            warn!("Import already in progress");
            continue;
        }

        let Some(transform) = editor.transform else {
            import_error.messages =
                vec!["Reference image is not loaded; cannot import areas".to_string()];
            continue;
        };

        if event.paths.is_empty() {
            continue;
        }

        async_op.is_importing = true;
        async_op.operation_description =
            Some(format!("Importing {} area file(s)...", event.paths.len()));

        let paths = event.paths.clone();
        let task = IoTaskPool::get().spawn(async move { read_areas(paths, transform) });
        commands.spawn(ImportAreasTask(task));
    }
}

/// Commits finished imports. Rings are added in file order.
pub fn poll_import_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ImportAreasTask)>,
    mut editor: ResMut<AreaEditor>,
    mut async_op: ResMut<AsyncImportOperation>,
    mut import_error: ResMut<AreaImportError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(files) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        async_op.is_importing = false;
        async_op.operation_description = None;
        import_error.messages = commit_imports(&mut editor.session, files);

        commands.entity(entity).despawn();
    }
}

/// Adds every decoded ring to the session and returns one message per failed file.
fn commit_imports(session: &mut EditorSession, files: Vec<ImportedFile>) -> Vec<String> {
    let mut failures = Vec::new();
    for file in files {
        match file.ring {
            Ok(ring) => {
                info!("Importing file: {:?} ({} vertices)", file.path, ring.len());
                session.import_ring(ring);
            }
            Err(e) => {
                error!("Failed to import {:?}: {}", file.path, e);
                failures.push(describe_failure(&file.path, &e));
            }
        }
    }
    failures
}

fn describe_failure(path: &Path, error: &AreaError) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("area file");
    match error {
        AreaError::MalformedCoordinate { .. } => format!("{}: bad coordinate ({})", name, error),
        _ => format!("{}: {}", name, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{
        export, write_area_file, AreaMetadata, CalibrationCorners, PolygonRing, Vertex,
    };

    fn transform() -> CoordinateTransform {
        CoordinateTransform::new(CalibrationCorners::default(), 512, 512).unwrap()
    }

    fn write_square(dir: &Path, name: &str, origin: i32) -> PathBuf {
        let ring: PolygonRing = [(0, 0), (40, 0), (40, 40), (0, 0)]
            .into_iter()
            .map(|(x, y)| Vertex::new(origin + x, origin + y))
            .collect();
        let area = export(&ring, &transform(), name, &AreaMetadata::default()).unwrap();
        write_area_file(dir, &area).unwrap()
    }

    #[test]
    fn test_import_keeps_file_order_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_square(dir.path(), "first", 10);
        let broken = dir.path().join("broken.enum");
        std::fs::write(
            &broken,
            r#"{"inputType":"int","outputType":"coordinate","default":-1,"values":{"0":"0_1_2"}}"#,
        )
        .unwrap();
        let second = write_square(dir.path(), "second", 200);

        let files = read_areas(vec![first, broken, second], transform());
        let mut session = EditorSession::default();
        let failures = commit_imports(&mut session, files);

        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("broken.enum"));

        let rings: Vec<_> = session.completed().map(|(_, ring)| ring.clone()).collect();
        assert_eq!(rings.len(), 2);
        assert!((rings[0].vertices()[0].x - 10).abs() <= 1);
        assert!((rings[1].vertices()[0].x - 200).abs() <= 1);
        assert!(session.current().is_empty());
    }

    #[test]
    fn test_out_of_range_coordinate_fails_only_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let huge = dir.path().join("huge.enum");
        std::fs::write(
            &huge,
            "inputType: int\n\
             outputType: coordinate\n\
             default: -1\n\
             values:\n  \
             \"0\": \"0_1_0_9223372036854775807_0\"\n",
        )
        .unwrap();
        let good = write_square(dir.path(), "good", 50);

        let files = read_areas(vec![huge, good], transform());
        assert!(matches!(files[0].ring, Err(AreaError::MalformedCoordinate { .. })));

        let mut session = EditorSession::default();
        let failures = commit_imports(&mut session, files);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("huge.enum"));
        assert_eq!(session.completed().count(), 1);
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let files = read_areas(vec![dir.path().join("gone.enum")], transform());
        assert!(matches!(files[0].ring, Err(AreaError::Io { .. })));
    }
}
