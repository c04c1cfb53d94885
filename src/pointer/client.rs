use std::thread;
use std::time::Duration;

use crate::config::PointerConfig;
use crate::pointer::error::PointerError;

/// The three logical commands the pointer hardware understands. The
/// control loop only talks to this trait; tests substitute a recording
/// fake.
pub trait Actuator {
    /// Move the azimuth stepper by a signed step count. Zero steps is a
    /// no-op and must not contact the device.
    fn stepper(&mut self, steps: i64) -> Result<(), PointerError>;
    /// Set the altitude servo. Angles outside [0, 90] are clamped.
    fn servo(&mut self, angle_deg: f64) -> Result<(), PointerError>;
    fn led(&mut self, on: bool) -> Result<(), PointerError>;
}

/// HTTP client for the pointer device. Every logical command becomes one
/// or more GET requests; a stepper move is `start`, `rpm`, `steps`, `stop`
/// in that order. A short pause follows every request so the device's
/// inbound buffer keeps up.
pub struct PointerClient {
    http: reqwest::blocking::Client,
    base_url: String,
    rpm: u32,
    inter_request_delay: Duration,
}

impl PointerClient {
    pub fn from_config(config: &PointerConfig) -> Result<Self, PointerError> {
        Self::new(
            &config.base_url,
            config.rpm,
            Duration::from_secs(config.request_timeout_s),
            Duration::from_millis(config.inter_request_delay_ms),
        )
    }

    pub fn new(
        base_url: &str,
        rpm: u32,
        timeout: Duration,
        inter_request_delay: Duration,
    ) -> Result<Self, PointerError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            rpm,
            inter_request_delay,
        })
    }

    fn get(&self, path: &str) -> Result<(), PointerError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {url}");
        let result = self.http.get(&url).send();
        thread::sleep(self.inter_request_delay);
        let response = result?;
        if !response.status().is_success() {
            return Err(PointerError::Status {
                endpoint: path.to_string(),
                status: response.status(),
            });
        }
        Ok(())
    }

    fn stepper_sequence(&self, steps: i64) -> Result<(), PointerError> {
        self.get("stepper/start")?;
        self.get(&format!("stepper/rpm?{}", self.rpm))?;
        self.get(&format!("stepper/steps?{steps}"))?;
        self.get("stepper/stop")
    }
}

impl Actuator for PointerClient {
    fn stepper(&mut self, steps: i64) -> Result<(), PointerError> {
        if steps == 0 {
            return Ok(());
        }
        let result = self.stepper_sequence(steps);
        if result.is_err() {
            // Best effort: do not leave the motor running. The rest of
            // the sequence is abandoned either way.
            if let Err(stop_err) = self.get("stepper/stop") {
                log::warn!("stepper stop after failed sequence also failed: {stop_err}");
            }
        }
        result
    }

    fn servo(&mut self, angle_deg: f64) -> Result<(), PointerError> {
        self.get(&format!("servo/value?{}", servo_wire_angle(angle_deg)))
    }

    fn led(&mut self, on: bool) -> Result<(), PointerError> {
        self.get(if on { "led/on" } else { "led/off" })
    }
}

/// The servo takes whole degrees in [0, 90] on the wire.
pub fn servo_wire_angle(angle_deg: f64) -> i64 {
    angle_deg.clamp(0.0, 90.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};

    /// Minimal in-process HTTP listener: records request paths and answers
    /// each request with the next scripted status (200 once the script
    /// runs out).
    struct WireServer {
        base_url: String,
        paths: Arc<Mutex<Vec<String>>>,
    }

    fn spawn_server(statuses: &[u16]) -> WireServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let paths = Arc::new(Mutex::new(Vec::new()));
        let recorded = paths.clone();
        let mut script: VecDeque<u16> = statuses.iter().copied().collect();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                if let Some(path) = head.lines().next().and_then(|l| l.split_whitespace().nth(1))
                {
                    recorded.lock().unwrap().push(path.to_string());
                }
                let status = script.pop_front().unwrap_or(200);
                let _ = stream.write_all(
                    format!(
                        "HTTP/1.1 {status} X\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
        });

        WireServer { base_url, paths }
    }

    fn client_for(server: &WireServer) -> PointerClient {
        PointerClient::new(
            &server.base_url,
            10,
            Duration::from_secs(5),
            Duration::from_millis(0),
        )
        .unwrap()
    }

    #[test]
    fn stepper_move_hits_the_endpoints_in_order() {
        let server = spawn_server(&[]);
        let mut client = client_for(&server);

        client.stepper(42).unwrap();

        assert_eq!(
            *server.paths.lock().unwrap(),
            vec![
                "/stepper/start",
                "/stepper/rpm?10",
                "/stepper/steps?42",
                "/stepper/stop"
            ]
        );
    }

    #[test]
    fn failed_steps_request_gets_one_stop_and_nothing_more() {
        // start and rpm succeed, the steps request fails.
        let server = spawn_server(&[200, 200, 503]);
        let mut client = client_for(&server);

        let err = client.stepper(-7).unwrap_err();
        match err {
            PointerError::Status { endpoint, status } => {
                assert_eq!(endpoint, "stepper/steps?-7");
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
            }
            other => panic!("unexpected error: {other}"),
        }

        // The sequence is abandoned after a single best-effort stop.
        assert_eq!(
            *server.paths.lock().unwrap(),
            vec![
                "/stepper/start",
                "/stepper/rpm?10",
                "/stepper/steps?-7",
                "/stepper/stop"
            ]
        );
    }

    #[test]
    fn zero_steps_never_touches_the_wire() {
        let server = spawn_server(&[]);
        let mut client = client_for(&server);

        client.stepper(0).unwrap();

        assert!(server.paths.lock().unwrap().is_empty());
    }

    #[test]
    fn servo_and_led_wire_paths() {
        let server = spawn_server(&[]);
        let mut client = client_for(&server);

        client.servo(97.3).unwrap();
        client.led(true).unwrap();
        client.led(false).unwrap();

        assert_eq!(
            *server.paths.lock().unwrap(),
            vec!["/servo/value?90", "/led/on", "/led/off"]
        );
    }

    #[test]
    fn servo_angle_is_clamped_and_rounded() {
        assert_eq!(servo_wire_angle(-12.0), 0);
        assert_eq!(servo_wire_angle(0.0), 0);
        assert_eq!(servo_wire_angle(44.4), 44);
        assert_eq!(servo_wire_angle(44.6), 45);
        assert_eq!(servo_wire_angle(90.0), 90);
        assert_eq!(servo_wire_angle(97.3), 90);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = PointerClient::new(
            "http://192.168.1.82/",
            10,
            Duration::from_secs(10),
            Duration::from_millis(0),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://192.168.1.82");
    }
}
