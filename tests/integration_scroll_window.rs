use term_gui::input::MouseButton;
use term_gui::widgets::{Button, Panel};
use term_gui::{
    Element, InputSnapshot, MainContainer, Rect, ScrollElement, Window, WindowConfig, erase,
    shared,
};

fn held(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot::at(x, y).pressed(MouseButton::Left)
}

#[test]
fn wide_content_gets_only_a_horizontal_bar() {
    let content = shared(Panel::new(Rect::new(0, 0, 300, 50)));
    let scroll = shared(ScrollElement::new(Rect::new(0, 0, 100, 100), &erase(&content)));
    let mut main = MainContainer::new(100, 100);
    main.push_top(&erase(&scroll));

    main.handle(&InputSnapshot::at(200, 200));
    {
        let scroll = scroll.borrow();
        assert!(scroll.horizontal_enabled());
        assert!(!scroll.vertical_enabled());
        assert_eq!(scroll.scroll_size().0, 200);
        assert_eq!(scroll.viewport(), Rect::new(0, 0, 100, 99));
    }

    scroll.borrow_mut().scroll_to(50, 0);
    main.handle(&InputSnapshot::at(200, 200));
    let viewport = scroll.borrow().viewport();
    assert_eq!(content.borrow().base().x0(), viewport.x0 - 50);
    assert_eq!(content.borrow().base().y0(), viewport.y0);
}

#[test]
fn scrolled_content_only_reacts_inside_viewport() {
    let list = shared(term_gui::Container::new(Rect::new(0, 0, 20, 40)));
    let button = shared(Button::new(Rect::new(0, 0, 10, 2), "deep"));
    list.borrow_mut().push_top_at(&erase(&button), 0, 30);
    let scroll = shared(ScrollElement::new(Rect::new(0, 0, 21, 10), &erase(&list)));
    let mut main = MainContainer::new(80, 24);
    main.push_top(&erase(&scroll));

    // The button sits below the viewport, where the pointer is outside the
    // scroll element entirely.
    main.handle(&InputSnapshot::at(2, 30));
    assert!(!button.borrow().base().mouse_over());

    scroll.borrow_mut().scroll_to(0, 28);
    main.handle(&InputSnapshot::at(2, 3));
    assert_eq!(button.borrow().base().y0(), 2);
    assert!(button.borrow().base().mouse_over());
}

#[test]
fn grabbed_content_dragged_out_of_viewport_is_not_over() {
    let list = shared(term_gui::Container::new(Rect::new(0, 0, 20, 40)));
    let button = shared(Button::new(Rect::new(0, 0, 10, 2), "deep"));
    list.borrow_mut().push_top_at(&erase(&button), 0, 30);
    let scroll = shared(ScrollElement::new(Rect::new(0, 0, 21, 10), &erase(&list)));
    let mut main = MainContainer::new(80, 24);
    main.push_top(&erase(&scroll));

    main.handle(&InputSnapshot::at(2, 30));
    scroll.borrow_mut().scroll_to(0, 28);
    main.handle(&InputSnapshot::at(2, 3));
    main.handle(&held(2, 3));
    assert!(button.borrow().base().grabbed(MouseButton::Left));

    main.handle(&held(2, 11));
    {
        let button = button.borrow();
        assert!(button.base().grabbed(MouseButton::Left));
        assert!(!button.base().mouse_over());
    }

    main.handle(&InputSnapshot::at(2, 11));
    assert_eq!(button.borrow().clicks(), 0);
}

#[test]
fn dragging_the_top_bar_moves_every_part() {
    let window = shared(Window::new(
        Rect::new(10, 10, 70, 50),
        WindowConfig::new("drag me").min_size(10, 5),
    ));
    let child = shared(Panel::new(Rect::new(0, 0, 5, 5)));
    window.borrow_mut().push_top_at(&erase(&child), 3, 3);
    let mut main = MainContainer::new(200, 100);
    main.push_top(&erase(&window));

    let parts = |window: &Window| {
        (
            window.top_bar_rect(),
            window.close_button_rect(),
            window.resizer_rect(),
            window.content_rect(),
        )
    };
    let before = parts(&window.borrow());
    let child_before = child.borrow().base().rect();

    main.handle(&InputSnapshot::at(20, 11));
    main.handle(&held(20, 11));
    main.handle(&held(25, 13));
    main.handle(&held(30, 16));
    main.handle(&InputSnapshot::at(30, 16));

    let shifted = |rect: Option<Rect>| rect.map(|rect| rect.translated(10, 5));
    let after = parts(&window.borrow());
    assert_eq!(after.0, shifted(before.0));
    assert_eq!(after.1, shifted(before.1));
    assert_eq!(after.2, shifted(before.2));
    assert_eq!(after.3, before.3.translated(10, 5));
    assert_eq!(window.borrow().base().rect(), Rect::new(20, 15, 80, 55));
    assert_eq!(child.borrow().base().rect(), child_before.translated(10, 5));
}

#[test]
fn closing_a_window_hides_it_from_the_tree() {
    let window = shared(Window::new(
        Rect::new(0, 0, 30, 12),
        WindowConfig::new("bye").min_size(10, 5),
    ));
    let close = window.borrow().close_button_rect().expect("close button");
    let mut main = MainContainer::new(80, 24);
    main.push_top(&erase(&window));

    let (x, y) = (close.x0 + 1, close.y0);
    main.handle(&InputSnapshot::at(x, y));
    main.handle(&held(x, y));
    main.handle(&InputSnapshot::at(x, y));
    assert!(window.borrow().is_closed());
    assert!(main.hit_test(x, y).is_none());
}

#[test]
fn scrollable_window_scrolls_tall_content() {
    let window = shared(Window::new(
        Rect::new(0, 0, 30, 12),
        WindowConfig::new("list").min_size(10, 5).scrollable(true),
    ));
    let rows: Vec<_> = (0..10)
        .map(|row| {
            let button = shared(Button::new(Rect::new(0, 0, 10, 1), format!("row {row}")));
            window.borrow_mut().push_top_at(&erase(&button), 0, row * 3);
            button
        })
        .collect();
    let mut main = MainContainer::new(80, 24);
    main.push_top(&erase(&window));
    main.handle(&InputSnapshot::at(70, 20));

    let window = window.borrow();
    let scroll = window.scroll().expect("scrollable");
    assert!(scroll.vertical_enabled());
    assert!(!scroll.horizontal_enabled());
    let viewport = scroll.viewport();
    assert_eq!(scroll.scroll_size().1, 28 - viewport.height());
    assert_eq!(rows[0].borrow().base().y0(), viewport.y0);
}
