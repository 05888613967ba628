#![cfg(target_arch = "wasm32")]

use arbor_dom::{events::attached_listeners, Collection, Listener};
use std::{cell::Cell, rc::Rc};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Event, EventInit, Node};


wasm_bindgen_test_configure!(run_in_browser);

fn fire(node: &Node, event_type: &str) {
	node.dispatch_event(&Event::new(event_type).unwrap()).unwrap();
}

fn fire_bubbling(node: &Node, event_type: &str) {
	let mut init = EventInit::new();
	init.bubbles(true);
	node.dispatch_event(&Event::new_with_event_init_dict(event_type, &init).unwrap()).unwrap();
}

fn fire_all(collection: &Collection, event_type: &str) {
	for node in collection {
		fire(node, event_type)
	}
}

#[wasm_bindgen_test]
fn on_and_off() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);

	let count = Rc::new(Cell::new(0));
	let listener = Listener::new({
		let count = Rc::clone(&count);
		move |_| count.set(count.get() + 1)
	});

	groups.on("click  mouseup", &listener);
	assert_eq!(listener.subscriptions(), 6);
	fire_all(&groups, "click");
	fire_all(&groups, "mouseup");
	assert_eq!(count.get(), 6);

	groups.off("click", &listener);
	assert_eq!(listener.subscriptions(), 3);
	fire_all(&groups, "click");
	assert_eq!(count.get(), 6);

	groups.off("mouseup", &listener);
	assert_eq!(listener.subscriptions(), 0);
	fire_all(&groups, "mouseup");
	assert_eq!(count.get(), 6);

	root.remove();
}

#[wasm_bindgen_test]
fn one_fires_once_across_nodes() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);

	let count = Rc::new(Cell::new(0));
	let seen = Rc::new(Cell::new(0));
	groups.one("click", {
		let (count, seen) = (Rc::clone(&count), Rc::clone(&seen));
		move |collection, _| {
			count.set(count.get() + 1);
			seen.set(collection.len());
		}
	});

	fire_all(&groups, "click");
	fire_all(&groups, "click");
	assert_eq!(count.get(), 1);
	assert_eq!(seen.get(), 3);

	root.remove();
}

#[wasm_bindgen_test]
fn one_each_fires_once_per_node() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);

	let count = Rc::new(Cell::new(0));
	groups.one_each("click", {
		let count = Rc::clone(&count);
		move |node, _| {
			assert_eq!(node.len(), 1);
			count.set(count.get() + 1)
		}
	});

	fire_all(&groups, "click");
	fire_all(&groups, "click");
	assert_eq!(count.get(), 3);

	root.remove();
}

#[wasm_bindgen_test]
fn delegate_finds_nearest_match() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let outer = root.child("g");
	outer.add_class("item");
	let inner = outer.child("g");
	inner.add_class("item");
	let circle = inner.child("circle");
	let bare = root.child("rect");

	let matched = Rc::new(Cell::new(None::<usize>));
	let listener = root.delegate("click", "g.item", {
		let (matched, inner) = (Rc::clone(&matched), inner.clone());
		move |nearest, _| matched.set(Some(if *nearest == inner { 1 } else { 2 }))
	});

	fire_bubbling(&circle.nodes()[0], "click");
	assert_eq!(matched.get(), Some(1));

	matched.set(None);
	fire_bubbling(&bare.nodes()[0], "click");
	assert_eq!(matched.get(), None);

	root.off("click", &listener);
	fire_bubbling(&circle.nodes()[0], "click");
	assert_eq!(matched.get(), None);

	root.remove();
}

#[wasm_bindgen_test]
fn one_leaves_no_subscriptions() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);
	let before = attached_listeners();

	groups.one("click mouseup", |_, _| ());
	assert_eq!(attached_listeners(), before + 2);

	fire(&groups.nodes()[1], "click");
	assert_eq!(attached_listeners(), before + 1);

	fire_all(&groups, "mouseup");
	assert_eq!(attached_listeners(), before);

	root.remove();
}

#[wasm_bindgen_test]
fn removed_nodes_release_subscriptions() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);
	let before = attached_listeners();

	let listener = Listener::new(|_| ());
	groups.on("click", &listener);
	groups.one("mouseup", |_, _| ());
	groups.one_each("focus", |_, _| ());
	let delegated = root.delegate("click", "g", |_, _| ());
	assert_eq!(attached_listeners(), before + 6);

	groups.first().remove();
	assert_eq!(listener.subscriptions(), 2);
	assert_eq!(attached_listeners(), before + 5);

	root.empty();
	assert_eq!(listener.subscriptions(), 0);
	assert_eq!(delegated.subscriptions(), 1);
	assert_eq!(attached_listeners(), before + 1);

	root.remove();
	assert_eq!(delegated.subscriptions(), 0);
	assert_eq!(attached_listeners(), before);
}

#[wasm_bindgen_test]
fn one_capturing_runs_in_capture_phase() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 2);

	let captured = Rc::new(Cell::new(0));
	let bubbled = Rc::new(Cell::new(0));
	root.one_capturing("ping", {
		let captured = Rc::clone(&captured);
		move |_, _| captured.set(captured.get() + 1)
	});
	root.one("ping", {
		let bubbled = Rc::clone(&bubbled);
		move |_, _| bubbled.set(bubbled.get() + 1)
	});

	// `ping` doesn't bubble, so only the capturing ancestor sees it.
	fire_all(&groups, "ping");
	assert_eq!(captured.get(), 1);
	assert_eq!(bubbled.get(), 0);

	let each = Rc::new(Cell::new(0));
	groups.one_each_capturing("ping", {
		let each = Rc::clone(&each);
		move |_, _| each.set(each.get() + 1)
	});
	fire_all(&groups, "ping");
	fire_all(&groups, "ping");
	assert_eq!(each.get(), 2);

	root.remove();
}
