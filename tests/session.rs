mod common;

use common::{LoopbackLink, RecordingDelay};
use pretty_assertions::assert_eq;
use serial_example::probe::PROBE_MESSAGES;
use serial_example::{bcc, ReadLength, Session, SessionConfig};
use std::time::Duration;

fn session(config: SessionConfig) -> (Session<LoopbackLink>, LoopbackLink, RecordingDelay) {
    let link = LoopbackLink::new();
    let delay = RecordingDelay::default();
    let session = Session::with_delay(link.clone(), config, Box::new(delay.clone()));
    (session, link, delay)
}

#[test]
fn probe_frames_every_message() {
    let (mut session, link, delay) = session(SessionConfig::default());
    let mut out = Vec::<u8>::new();

    let exchanges = session.probe(&PROBE_MESSAGES, &mut out).unwrap();

    assert_eq!(exchanges.len(), PROBE_MESSAGES.len());
    for (exchange, message) in exchanges.iter().zip(PROBE_MESSAGES) {
        assert_eq!(exchange.request, bcc::frame(message));
        assert_eq!(exchange.written, exchange.request.len());
        // A loopback hands the frame straight back
        assert_eq!(exchange.response, exchange.request.as_bytes());
        assert!(exchange.bcc_valid);
    }
    assert_eq!(link.log.borrow().writes.len(), 11);
    assert!(delay.pauses.borrow().is_empty());

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches(">>(").count(), 11);
    assert_eq!(text.matches("<<(").count(), 11);
}

#[test]
fn probe_pauses_between_messages() {
    let config = SessionConfig {
        probe_gap: Duration::from_millis(5),
        ..SessionConfig::default()
    };
    let (mut session, _link, delay) = session(config);

    session.probe(&PROBE_MESSAGES[..3], &mut Vec::<u8>::new()).unwrap();

    assert_eq!(*delay.pauses.borrow(), vec![Duration::from_millis(5); 2]);
}

#[test]
fn silent_device_gives_empty_replies() {
    let (mut session, link, _delay) = session(SessionConfig::default());
    link.log.borrow_mut().mute = true;
    let mut out = Vec::<u8>::new();

    let exchanges = session.probe(&PROBE_MESSAGES[..1], &mut out).unwrap();

    assert!(exchanges[0].response.is_empty());
    assert!(!exchanges[0].bcc_valid);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("<<(0):\t\n"));
}

#[test]
fn characterize_reports_each_loop() {
    let (mut session, link, _delay) = session(SessionConfig::default());
    let mut out = Vec::<u8>::new();

    let runs = session.characterize("ping", &mut out).unwrap();
    let framed = bcc::frame("ping");
    let len = framed.len();

    assert_eq!(runs.len(), 4);
    assert_eq!(
        runs.iter().map(|r| (r.timeout_ms, r.read_length)).collect::<Vec<_>>(),
        vec![
            (1000, ReadLength::OneMore),
            (250, ReadLength::OneMore),
            (250, ReadLength::Exact),
            (250, ReadLength::OneLess),
        ]
    );
    assert!(runs.iter().all(|r| r.iterations.len() == 10));

    // Asking for one more than was written always comes back short
    assert_eq!(runs[0].timeouts(), 10);
    assert!(runs[0].iterations.iter().all(|i| i.requested == len + 1 && i.read == len));
    assert_eq!(runs[2].timeouts(), 0);

    // Asking for one less leaves a byte behind each time
    assert!(runs[3].iterations.iter().all(|i| i.requested == len - 1 && i.read == len - 1));
    assert_eq!(link.log.borrow().pending.len(), 10);

    let reads = link.log.borrow().reads.clone();
    assert_eq!(reads.len(), 40);
    assert_eq!(&reads[..10], vec![len + 1; 10].as_slice());
    assert_eq!(&reads[30..], vec![len - 1; 10].as_slice());
}

#[test]
fn debug_print_dumps_traffic() {
    let (mut session, _link, _delay) = session(SessionConfig::default());
    session.set_debug_print(true, true);
    let mut out = Vec::<u8>::new();

    session.probe(&["AB"], &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    // 0x41 ^ 0x42 == 0x03
    assert!(text.contains("Sending:  41 42 30 33 0D\n"));
    assert!(text.contains("Received: 41 42 30 33 0D\n"));
}

#[test]
fn iteration_count_follows_config() {
    let config = SessionConfig {
        iterations: 3,
        ..SessionConfig::default()
    };
    let (mut session, link, _delay) = session(config);

    session.characterize("x", &mut Vec::<u8>::new()).unwrap();

    assert_eq!(link.log.borrow().writes.len(), 12);
}

#[test]
fn replies_are_echoed_byte_for_byte() {
    let (mut session, link, _delay) = session(SessionConfig::default());
    {
        let mut log = link.log.borrow_mut();
        log.mute = true;
        log.pending.extend([0x06, 0xFF, b'\r']);
    }
    let mut out = Vec::<u8>::new();

    session.probe(&PROBE_MESSAGES[..1], &mut out).unwrap();

    let expected: &[u8] = b"<<(3):\t\x06\xFF\r\n\n";
    assert!(out.ends_with(expected));
}
