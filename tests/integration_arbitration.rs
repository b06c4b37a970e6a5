use term_gui::element::same_element;
use term_gui::input::MouseButton;
use term_gui::widgets::{Button, Panel};
use term_gui::{
    Element, ElementHandle, InputSnapshot, MainContainer, Rect, Window, WindowConfig, erase,
    shared,
};

fn held(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot::at(x, y).pressed(MouseButton::Left)
}

fn click(main: &mut MainContainer, x: i32, y: i32) {
    for input in [InputSnapshot::at(x, y), held(x, y), InputSnapshot::at(x, y)] {
        main.handle(&input);
    }
}

fn owner_is(main: &MainContainer, handle: &ElementHandle) -> bool {
    main.root()
        .owner()
        .is_some_and(|owner| same_element(&owner, handle))
}

#[test]
fn exactly_one_child_is_not_occluded() {
    let mut main = MainContainer::new(200, 200);
    let panels: Vec<ElementHandle> = [
        Rect::new(0, 0, 100, 100),
        Rect::new(50, 50, 150, 150),
        Rect::new(25, 75, 175, 125),
    ]
    .into_iter()
    .map(|rect| erase(&shared(Panel::new(rect))))
    .collect();
    for panel in &panels {
        main.push_top(panel);
    }

    let path = [(10, 10), (60, 60), (100, 100), (30, 80), (140, 140), (60, 60)];
    for (step, (x, y)) in path.into_iter().enumerate() {
        let input = if step % 2 == 0 { held(x, y) } else { InputSnapshot::at(x, y) };
        main.handle(&input);
        let clear = panels
            .iter()
            .filter(|panel| !panel.borrow().base().element_over())
            .count();
        assert_eq!(clear, 1, "pointer at ({x}, {y})");
    }
}

#[test]
fn grab_outlives_pointer_leaving() {
    let mut main = MainContainer::new(200, 200);
    let a = shared(Button::new(Rect::new(0, 0, 50, 50), "a"));
    let b = shared(Button::new(Rect::new(50, 0, 100, 50), "b"));
    main.push_top(&erase(&a));
    main.push_top(&erase(&b));

    main.handle(&InputSnapshot::at(10, 10));
    main.handle(&held(10, 10));
    assert!(owner_is(&main, &erase(&a)));

    for (x, y) in [(70, 10), (150, 150), (-20, 300)] {
        main.handle(&held(x, y));
        assert!(owner_is(&main, &erase(&a)), "pointer at ({x}, {y})");
        assert!(a.borrow().base().grabbed(MouseButton::Left));
        assert!(!b.borrow().base().mouse_over());
    }

    main.handle(&InputSnapshot::at(70, 10));
    assert!(owner_is(&main, &erase(&b)));
    assert!(!a.borrow().base().grabbed(MouseButton::Left));
    assert_eq!(a.borrow().clicks(), 0);
    assert_eq!(b.borrow().clicks(), 0);
}

#[test]
fn fresh_press_raises_floating_child_once() {
    let mut main = MainContainer::new(200, 100);
    let config = || WindowConfig::new("w").min_size(10, 5);
    let first = shared(Window::new(Rect::new(0, 0, 60, 30), config()));
    let second = shared(Window::new(Rect::new(40, 10, 100, 40), config()));
    main.push_top(&erase(&first));
    main.push_top(&erase(&second));
    let first = erase(&first);

    main.handle(&InputSnapshot::at(10, 15));
    main.handle(&held(10, 15));
    assert_eq!(main.root().index_of(&first), Some(1));

    // A new sibling lands on top while the press is still held. The held
    // window must not climb over it again.
    let cover = erase(&shared(Panel::new(Rect::new(150, 0, 200, 20))));
    main.push_top(&cover);
    for _ in 0..3 {
        main.handle(&held(10, 15));
        assert_eq!(main.root().index_of(&first), Some(1));
    }

    main.handle(&InputSnapshot::at(10, 15));
    main.handle(&held(10, 15));
    assert_eq!(main.root().index_of(&first), Some(2));
}

#[test]
fn non_floating_children_keep_their_order() {
    let mut main = MainContainer::new(100, 100);
    let low = erase(&shared(Button::new(Rect::new(0, 0, 40, 40), "low")));
    let high = erase(&shared(Button::new(Rect::new(50, 50, 90, 90), "high")));
    main.push_top(&low);
    main.push_top(&high);
    click(&mut main, 10, 10);
    assert_eq!(main.root().index_of(&low), Some(0));
}

#[test]
fn click_goes_to_top_button_then_to_the_one_below() {
    let mut main = MainContainer::new(200, 200);
    let a = shared(Button::new(Rect::new(0, 0, 100, 100), "a"));
    let b = shared(Button::new(Rect::new(0, 0, 100, 100), "b"));
    main.push_top(&erase(&a));
    main.push_top(&erase(&b));

    click(&mut main, 50, 50);
    assert_eq!(b.borrow().clicks(), 1);
    assert_eq!(a.borrow().clicks(), 0);
    assert!(main.hit_test(50, 50).is_some_and(|hit| same_element(&hit, &erase(&b))));

    assert!(main.remove(&erase(&b)));
    click(&mut main, 50, 50);
    assert_eq!(a.borrow().clicks(), 1);
    assert_eq!(b.borrow().clicks(), 1);
}

#[test]
fn dropped_handle_counts_as_removed() {
    let mut main = MainContainer::new(200, 200);
    let a = shared(Button::new(Rect::new(0, 0, 100, 100), "a"));
    let b = shared(Button::new(Rect::new(0, 0, 100, 100), "b"));
    main.push_top(&erase(&a));
    main.push_top(&erase(&b));

    main.handle(&InputSnapshot::at(50, 50));
    main.handle(&held(50, 50));
    drop(b);
    main.handle(&InputSnapshot::at(50, 50));
    click(&mut main, 50, 50);
    assert_eq!(a.borrow().clicks(), 1);
    assert_eq!(main.root().len(), 1);
}
