//! Emulated device: serves the diagnostic commands on a Unix socket.
//!
//! Run with:
//!   cargo run --example emulated-device
//!
//! In another terminal:
//!   cargo run --features cli -- selftest --port unix:/tmp/uartprims-emulated-<pid>/device.sock

#[cfg(unix)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::fs;
    use std::io::{Read, Write};
    use std::os::unix::net::UnixListener;

    use uartprims::frame::{build_frame, frame_len_hint, parse_response, Command, SOF};

    let sock_dir =
        std::env::temp_dir().join(format!("uartprims-emulated-{}", std::process::id()));
    fs::create_dir_all(&sock_dir)?;
    let sock_path = sock_dir.join("device.sock");

    // Ensure no stale socket
    let _ = fs::remove_file(&sock_path);

    let listener = UnixListener::bind(&sock_path)?;
    eprintln!("Listening on unix:{}", sock_path.display());

    let (mut stream, _) = listener.accept()?;
    eprintln!("Host connected");

    let mut buf = Vec::new();
    let mut chunk = [0u8; 64];
    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            eprintln!("Host disconnected");
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.first().is_some_and(|b| *b != SOF) {
            eprintln!("Dropping {} bytes of line noise", buf.len());
            buf.clear();
        }

        while let Some(len) = frame_len_hint(&buf) {
            if buf.len() < len {
                break;
            }
            let raw: Vec<u8> = buf.drain(..len).collect();
            let request = match parse_response(&raw) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Dropping bad request: {e}");
                    continue;
                }
            };

            let (status, data): (u8, Vec<u8>) = match Command::from_id(request.status) {
                Some(Command::Ping) => (0x00, b"PONG".to_vec()),
                Some(Command::GetVersion) => {
                    let mut data = vec![0, 1, 0];
                    data.extend_from_slice(b"librecipher 0.3");
                    (0x00, data)
                }
                // Wallet locked.
                Some(Command::GetStatus) => (0x00, vec![1]),
                _ => (0x02, Vec::new()),
            };
            eprintln!(
                "Request 0x{:02X} ({} bytes) -> status 0x{status:02X}",
                request.status,
                request.data.len()
            );
            stream.write_all(build_frame(status, &data)?.as_bytes())?;
        }
    }

    let _ = fs::remove_dir_all(&sock_dir);
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("emulated-device needs Unix domain sockets");
}
