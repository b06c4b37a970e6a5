use term_gui::sticky::EdgeAnchor;
use term_gui::widgets::Panel;
use term_gui::{Container, Element, Rect, Sticky, erase, shared};

#[test]
fn full_anchors_survive_a_round_trip() {
    let start = Rect::new(0, 0, 200, 100);
    let mut parent = Container::new(start);
    let inset = shared(Panel::new(Rect::new(10, 5, 190, 95)));
    let corner = shared(Panel::new(Rect::new(150, 60, 180, 90)));
    parent.push_top_full(&erase(&inset));
    parent.push_top_relative(&erase(&corner));

    for other in [
        Rect::new(0, 0, 150, 60),
        Rect::new(-40, 20, 260, 180),
        Rect::new(7, 3, 301, 99),
    ] {
        parent.resize(other);
        parent.resize(start);
        assert_eq!(inset.borrow().base().rect(), Rect::new(10, 5, 190, 95));
        assert_eq!(corner.borrow().base().rect(), Rect::new(150, 60, 180, 90));
    }
}

#[test]
fn half_anchor_stays_centered() {
    let mut parent = Container::new(Rect::new(0, 0, 100, 40));
    let marker = shared(Panel::new(Rect::new(45, 0, 55, 10)));
    let sticky = Sticky::new(
        EdgeAnchor::floating(0.5, -5),
        EdgeAnchor::following(0.0),
        EdgeAnchor::floating(0.5, 5),
        EdgeAnchor::following(0.0),
    );
    parent.push_top_with(&erase(&marker), sticky);

    for width in [20, 37, 100, 251, 10] {
        parent.resize(Rect::new(0, 0, width, 40));
        let rect = marker.borrow().base().rect();
        assert_eq!(rect.x0, width / 2 - 5, "width {width}");
        assert_eq!(rect.x1, width / 2 + 5, "width {width}");
        assert_eq!((rect.y0, rect.y1), (0, 10));
    }
}

#[test]
fn follow_edges_blend_parent_deltas() {
    let old = Rect::new(0, 0, 100, 100);
    let mut parent = Container::new(old);
    let child = shared(Panel::new(Rect::new(10, 10, 20, 20)));
    parent.push_top_with(&erase(&child), Sticky::following(0.0, 0.0, 1.0, 0.5));

    // near x moves by 5, far x by 25; near y by 2, far y by 12
    parent.resize(Rect::new(5, 2, 125, 112));
    assert_eq!(child.borrow().base().rect(), Rect::new(15, 12, 45, 27));
}

#[test]
fn moving_a_container_moves_children_rigidly() {
    let mut parent = Container::new(Rect::new(0, 0, 50, 50));
    let child = shared(Panel::new(Rect::new(5, 5, 15, 15)));
    parent.push_top_relative(&erase(&child));
    parent.move_by(-8, 12);
    assert_eq!(parent.base().rect(), Rect::new(-8, 12, 42, 62));
    assert_eq!(child.borrow().base().rect(), Rect::new(-3, 17, 7, 27));
}

#[test]
fn resize_respects_child_min_size() {
    let mut parent = Container::new(Rect::new(0, 0, 100, 100));
    let mut panel = Panel::new(Rect::new(0, 0, 50, 50));
    panel.base_mut().set_min_size(30, 30);
    let child = shared(panel);
    parent.push_top_relative(&erase(&child));
    parent.resize(Rect::new(0, 0, 20, 20));
    assert_eq!(child.borrow().base().rect(), Rect::new(0, 0, 30, 30));
}
