// Drives the compiled binary through a pseudo terminal so the real crossterm
// event loop, raw mode and alternate screen are exercised end to end.
//
// Requires a TTY, so it is Unix-only and ignored by default.
// Run manually via: `cargo test --test integration_pty_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn browse_and_quit_session() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("pumpdeck");
    let log = tempfile::NamedTempFile::new()?;
    let cmd = format!(
        "{} --hero-interval 200 --deals-interval 100 --log-file {}",
        bin.display(),
        log.path().display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(300));

    // move the hero, open search, go back home
    p.send("\x1b[C")?; // right arrow
    p.send("/pump")?;
    std::thread::sleep(Duration::from_millis(200));
    p.send("\x1b")?; // ESC leaves search
    std::thread::sleep(Duration::from_millis(200));

    p.send("q")?;
    p.expect(Eof)?;

    let contents = std::fs::read_to_string(log.path())?;
    assert!(contents.contains("pumpdeck started"));
    Ok(())
}
