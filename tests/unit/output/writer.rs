use super::*;

/// Codec whose encoder always fails, for exercising the no-partial-write path.
struct FailingCodec;

impl RasterCodec for FailingCodec {
    fn decode(&self, _bytes: &[u8]) -> RecolorResult<PixelBuffer> {
        Err(RecolorError::decode("unused"))
    }

    fn encode(&self, _buf: &PixelBuffer) -> RecolorResult<Vec<u8>> {
        Err(RecolorError::dimension("simulated encoder failure"))
    }
}

fn sample() -> PixelBuffer {
    PixelBuffer::from_straight_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap()
}

#[test]
fn temp_path_is_a_sibling_with_tmp_suffix() {
    assert_eq!(
        temp_path_for(Path::new("out/dir/icon.png")),
        PathBuf::from("out/dir/icon.png.tmp")
    );
}

#[test]
fn writes_png_and_removes_temp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out.png");

    write_atomic(&sample(), &path).unwrap();

    assert!(!temp_path_for(&path).exists());
    let back = PngCodec.decode(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, b"old contents").unwrap();

    write_atomic(&sample(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn encode_failure_keeps_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, b"old contents").unwrap();

    let err = write_atomic_with(&FailingCodec, &sample(), &path).unwrap_err();
    assert!(matches!(err, RecolorError::Write(_)), "{err}");
    assert!(err.to_string().contains("simulated encoder failure"));
    assert_eq!(std::fs::read(&path).unwrap(), b"old contents");
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn encode_failure_keeps_destination_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub/out.png");

    assert!(write_atomic_with(&FailingCodec, &sample(), &path).is_err());
    assert!(!path.exists());
    assert!(!temp_path_for(&path).exists());
    assert!(!dir.path().join("sub").exists());
}

#[test]
fn rename_failure_reports_and_leaves_temp() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory cannot be replaced by a file rename.
    let path = dir.path().join("taken.png");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), b"x").unwrap();

    let err = write_atomic(&sample(), &path).unwrap_err();
    assert!(matches!(err, RecolorError::Write(_)), "{err}");
    assert!(err.to_string().contains(".tmp"));
    assert!(temp_path_for(&path).is_file());
    assert!(path.join("keep").is_file());
}
