#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::tests::support::{harness, seeded};
    use crate::view::dismissal::{is_outside, Point, PointerHub, Rect, Region};
    use crate::view::selection::Selection;

    fn regions() -> Vec<Rc<dyn Region>> {
        // file list on the left, detail panel on the right
        let list: Rc<dyn Region> = Rc::new(Rect::new(0.0, 0.0, 400.0, 600.0));
        let detail: Rc<dyn Region> = Rc::new(Rect::new(420.0, 0.0, 300.0, 600.0));
        vec![list, detail]
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(15.0, 15.0)));
        assert!(!r.contains(Point::new(15.1, 12.0)));
        assert!(!r.contains(Point::new(9.9, 12.0)));
    }

    #[test]
    fn test_is_outside_all_regions() {
        let rs = regions();
        assert!(!is_outside(Point::new(100.0, 100.0), &rs));
        assert!(!is_outside(Point::new(500.0, 100.0), &rs));
        assert!(is_outside(Point::new(410.0, 100.0), &rs));
        assert!(is_outside(Point::new(100.0, 700.0), &rs));
        assert!(is_outside(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_hub_delivers_to_all_listeners() {
        let hub = PointerHub::new();
        let hits = Rc::new(Cell::new(0));
        let h1 = hits.clone();
        let h2 = hits.clone();
        let _a = hub.subscribe(move |_| h1.set(h1.get() + 1));
        let _b = hub.subscribe(move |_| h2.set(h2.get() + 10));
        hub.pointer_down(Point::new(1.0, 1.0));
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_subscription_drop_detaches() {
        let hub = PointerHub::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = hub.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(hub.listener_count(), 1);
        drop(sub);
        assert_eq!(hub.listener_count(), 0);
        hub.pointer_down(Point::new(1.0, 1.0));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_repeated_mounts_do_not_leak_listeners() {
        let hub = PointerHub::new();
        let (store, building) = seeded(&["a.csv"]);
        for _ in 0..5 {
            let h = harness(store.clone(), building, true);
            let sub = h.controller.attach_dismissal(&hub, regions());
            assert_eq!(hub.listener_count(), 1);
            h.controller.unmount();
            drop(sub);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = PointerHub::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }

    #[tokio::test]
    async fn test_scenario_d_outside_click_collapses() {
        let (store, building) = seeded(&["a.csv", "b.csv"]);
        let h = harness(store, building, true);
        h.controller.load_files().await.unwrap();
        let hub = PointerHub::new();
        let _sub = h.controller.attach_dismissal(&hub, regions());

        h.controller.select(1);
        assert!(h.controller.snapshot().selection().detail_visible());

        hub.pointer_down(Point::new(410.0, 50.0));
        assert_eq!(h.controller.snapshot().selection(), &Selection::Collapsed);
    }

    #[tokio::test]
    async fn test_inside_click_keeps_panel_open() {
        let (store, building) = seeded(&["a.csv", "b.csv"]);
        let h = harness(store, building, true);
        h.controller.load_files().await.unwrap();
        h.controller.select(2);
        h.controller.begin_edit();

        // e.g. the rename icon inside the detail panel
        assert!(!h.controller.pointer_down(Point::new(600.0, 300.0), &regions()));
        assert_eq!(h.controller.snapshot().selection().editing_id(), Some(2));

        assert!(!h.controller.pointer_down(Point::new(50.0, 50.0), &regions()));
        assert!(h.controller.pointer_down(Point::new(900.0, 50.0), &regions()));
        assert!(!h.controller.snapshot().selection().detail_visible());
    }

    #[tokio::test]
    async fn test_list_controls_count_as_inside() {
        let (store, building) = seeded(&["a.csv", "b.csv"]);
        let h = harness(store, building, true);
        h.controller.load_files().await.unwrap();
        h.controller.select(1);

        // The list region is the whole container: search box on top, table, pager below.
        let table = Rect::new(0.0, 60.0, 400.0, 450.0);
        let search = Point::new(200.0, 20.0);
        let pager = Point::new(200.0, 560.0);
        assert!(!table.contains(search) && !table.contains(pager));

        assert!(!h.controller.pointer_down(search, &regions()));
        assert!(!h.controller.pointer_down(pager, &regions()));
        assert_eq!(h.controller.snapshot().selection().selected_id(), Some(1));
    }

    #[test]
    fn test_outside_click_while_collapsed_is_noop() {
        let (store, building) = seeded(&[]);
        let h = harness(store, building, true);
        assert!(!h.controller.pointer_down(Point::new(900.0, 50.0), &regions()));
    }

    #[test]
    fn test_dropped_controller_is_not_kept_alive_by_hub() {
        let hub = PointerHub::new();
        let (store, building) = seeded(&[]);
        let h = harness(store, building, true);
        let sub = h.controller.attach_dismissal(&hub, regions());
        let weak = Rc::downgrade(&h.controller);
        drop(h);
        assert!(weak.upgrade().is_none());
        // still subscribed, but the listener finds nothing to collapse
        hub.pointer_down(Point::new(900.0, 50.0));
        drop(sub);
    }
}
