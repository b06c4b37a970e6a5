use term_gui::drivers::DriverError;
use term_gui::input::MouseButton;
use term_gui::widgets::Button;
use term_gui::{InputSnapshot, MainContainer, Rect, erase, shared};

// Installs the global subscriber, so this file holds a single test.
#[test]
fn debug_events_land_in_the_log_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gui.log");
    term_gui::tracing_sub::init(Some(&path)).expect("log file");

    let button = shared(Button::new(Rect::new(0, 0, 10, 3), "logged"));
    let mut main = MainContainer::new(40, 10);
    main.push_top(&erase(&button));
    main.handle(&InputSnapshot::at(2, 1));
    main.handle(&InputSnapshot::at(2, 1).pressed(MouseButton::Left));
    main.handle(&InputSnapshot::at(2, 1));

    let log = std::fs::read_to_string(&path).expect("read log");
    assert!(log.contains("child pushed on top"), "{log}");
    assert!(log.contains("grab started"), "{log}");
    assert!(log.contains("button clicked"), "{log}");

    let missing = dir.path().join("nope").join("gui.log");
    let err = term_gui::tracing_sub::init(Some(&missing)).expect_err("missing dir");
    assert!(matches!(err, DriverError::LogFile { .. }));
}
