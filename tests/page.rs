use std::rc::Rc;

use anchor_atoms::{
    atoms::{
        html::{h1, main, nav, section},
        if_state, use_parent, Conditional,
    },
    dom::{Dom, MemoryDom},
    fragment::{text, Builder, Layout},
    host::Host,
    reactive::Store,
    responsive::{on_desktop, on_phone, SizeTracker},
};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn page_follows_data_state_and_viewport() {
    let data = Store::new();
    let state = Store::new();
    let tracker = SizeTracker::new();
    data.set("user", "ada");
    tracker.resize(400);

    let host = Rc::new(Host::new().with_data(data.clone()).with_state(state.clone()));
    let builder = Builder::new(MemoryDom::new());
    let body = builder.dom().create_element("body").unwrap();

    let page = main::<MemoryDom>()
        .child(use_parent(|host: &Host| {
            let user = host.data.as_ref().and_then(|data| data.get("user"));

            match user.as_ref().and_then(Value::as_str) {
                Some(name) => Layout::render(h1::<MemoryDom>().text(format!("hi {name}"))),
                None => Layout::Clear,
            }
        }))
        .child(
            Conditional::<MemoryDom>::on_load()
                .fallback(|_, _| Layout::render(text::<MemoryDom, _>("loading")))
                .render(|_, _| Layout::render(section::<MemoryDom>().text("ready"))),
        )
        .child(if_state("tab", "settings", |_, _| {
            Layout::render(section::<MemoryDom>().class("settings"))
        }))
        .child(on_phone(&tracker, |_, _| {
            Layout::render(nav::<MemoryDom>().class("compact"))
        }))
        .child(on_desktop(&tracker, |_, _| {
            Layout::render(nav::<MemoryDom>().class("full"))
        }));

    let root = builder.build(page.into(), Some(&body), &host).unwrap();
    assert_eq!(
        builder.dom().to_html(body),
        concat!(
            "<body><main>",
            "<!--use--><h1>hi ada</h1>",
            "<!--on-load-->",
            "<!--if-state-->",
            r#"<!--on-phone--><nav class="compact"></nav>"#,
            "<!--on-desktop-->",
            "</main></body>"
        )
    );

    data.set("loaded", false);
    state.set("tab", "settings");
    tracker.resize(1200);
    assert_eq!(
        builder.dom().to_html(body),
        concat!(
            "<body><main>",
            "<!--use--><h1>hi ada</h1>",
            "<!--on-load-->loading",
            r#"<!--if-state--><section class="settings"></section>"#,
            "<!--on-phone-->",
            r#"<!--on-desktop--><nav class="full"></nav>"#,
            "</main></body>"
        )
    );

    data.set("loaded", true);
    data.set("user", "grace");
    state.set("tab", "profile");
    assert_eq!(
        builder.dom().to_html(body),
        concat!(
            "<body><main>",
            "<!--use--><h1>hi ada</h1>",
            "<!--on-load--><section>ready</section>",
            "<!--if-state-->",
            "<!--on-phone-->",
            r#"<!--on-desktop--><nav class="full"></nav>"#,
            "</main></body>"
        )
    );

    builder.remove_node(&root).unwrap();
    assert_eq!(builder.dom().to_html(body), "<body></body>");
    assert_eq!(data.watcher_count(), 0);
    assert_eq!(state.watcher_count(), 0);
    assert_eq!(tracker.store().watcher_count(), 0);
}

#[test]
fn rebuilding_after_removal_starts_fresh() {
    let data = Store::new();
    let host = Rc::new(Host::new().with_data(data.clone()));
    let builder = Builder::new(MemoryDom::new());
    let body = builder.dom().create_element("body").unwrap();

    let build = || {
        builder
            .build(
                Conditional::<MemoryDom>::on("count")
                    .render(|value, _| Layout::render(text::<MemoryDom, _>(value.to_string())))
                    .into(),
                Some(&body),
                &host,
            )
            .unwrap()
    };

    data.set("count", 1);
    let first = build();
    builder.remove_node(&first).unwrap();

    let _second = build();
    data.set("count", 2);

    assert_eq!(builder.dom().to_html(body), "<body><!--on-->2</body>");
    assert_eq!(data.watcher_count(), 1);
}
