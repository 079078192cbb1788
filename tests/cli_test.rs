use assert_cmd::Command; // Run programs
use predicates::prelude::*;
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

#[test]
fn file_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let orig_path = temp_dir.path().join("original.bin");
    let packed_path = temp_dir.path().join("original.lzss");
    let unpacked_path = temp_dir.path().join("unpacked.bin");
    // mixed fixture, repetitive enough to exercise back-references
    let mut data = Vec::new();
    for i in 0..2000u32 {
        data.push((i % 251) as u8);
        if i % 3 == 0 {
            data.extend_from_slice("abcabcabc".as_bytes());
        }
    }
    std::fs::write(&orig_path,&data)?;

    let mut cmd = Command::cargo_bin("bitpress")?;
    cmd.arg("-c")
        .arg("-i").arg(&orig_path)
        .arg("-o").arg(&packed_path)
        .assert()
        .success();
    let mut cmd = Command::cargo_bin("bitpress")?;
    cmd.arg("-d")
        .arg("-i").arg(&packed_path)
        .arg("-o").arg(&unpacked_path)
        .assert()
        .success();
    match (std::fs::read(&orig_path),std::fs::read(&unpacked_path)) {
        (Ok(v1),Ok(v2)) => {
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with original")
    }
    Ok(())
}

#[test]
fn pipe_round_trip() -> STDRESULT {
    let data = "to be or not to be, that is the question".as_bytes().to_vec();
    let mut cmd = Command::cargo_bin("bitpress")?;
    let packed = cmd.arg("-c")
        .write_stdin(data.clone())
        .assert()
        .success()
        .get_output().stdout.clone();
    let mut cmd = Command::cargo_bin("bitpress")?;
    let unpacked = cmd.arg("-d")
        .write_stdin(packed)
        .assert()
        .success()
        .get_output().stdout.clone();
    assert_eq!(unpacked,data);
    Ok(())
}

#[test]
fn rejects_conflicting_modes() -> STDRESULT {
    let mut cmd = Command::cargo_bin("bitpress")?;
    cmd.arg("-c").arg("-d")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one"));
    Ok(())
}

#[test]
fn empty_input_round_trip() -> STDRESULT {
    let mut cmd = Command::cargo_bin("bitpress")?;
    let packed = cmd.arg("-c")
        .write_stdin(Vec::new())
        .assert()
        .success()
        .get_output().stdout.clone();
    assert!(packed.is_empty());
    let mut cmd = Command::cargo_bin("bitpress")?;
    let unpacked = cmd.arg("-d")
        .write_stdin(Vec::new())
        .assert()
        .success()
        .get_output().stdout.clone();
    assert!(unpacked.is_empty());
    Ok(())
}
