//! Tests for MenuBuilder tree operations

use rstest::rstest;

use navmenu::application::render::HtmlRenderer;
use navmenu::application::services::{MenuBuilder, NewItem, DEFAULT_MENU_ID};
use navmenu::domain::{find_item, DomainError, Link, MenuItem};
use navmenu::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn keys(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|item| item.key.as_str()).collect()
}

fn html_builder() -> MenuBuilder {
    MenuBuilder::new().with_renderer(Box::new(HtmlRenderer::new()))
}

// ============================================================
// Insert / lookup
// ============================================================

#[test]
fn given_home_and_child_when_build_then_child_is_nested_under_home() {
    let mut menu = MenuBuilder::new();
    menu.insert("home", Link::new("/", "Home"), None, 50).unwrap();
    menu.insert("child", Link::new("/", "Home child"), Some("home"), 50)
        .unwrap();

    let built = menu.build();
    assert_eq!(keys(&built), ["home"]);
    assert_eq!(keys(&built[0].children), ["child"]);
    assert_eq!(menu.link("child").map(Link::anchor), Some("Home child"));
}

#[test]
fn given_distinct_inserts_when_lookup_then_each_item_is_found_unchanged() {
    let mut menu = MenuBuilder::new();
    let links = [
        ("a", Link::new("/a", "A"), None),
        ("b", Link::new("/b", "B").with_rels(["nofollow"]), Some("a")),
        ("c", Link::new("/c", "C"), Some("b")),
        ("d", Link::new("/d", "D"), None),
    ];
    for (key, link, parent) in links {
        menu.insert(key, link.clone(), parent, 50).unwrap();
        let node = menu.lookup(key).expect("just inserted");
        assert_eq!(node.link, link);
    }
}

#[test]
fn given_deep_key_when_inserting_duplicate_at_root_then_fails_and_tree_unchanged() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("a", "A", "/a")).unwrap();
    menu.add_item(NewItem::new("b", "B", "/b").parent("a")).unwrap();
    menu.add_item(NewItem::new("c", "C", "/c").parent("b")).unwrap();
    let before = menu.build();
    let exported_before = menu.export_source(DEFAULT_MENU_ID).cloned();

    let err = menu.add_item(NewItem::new("c", "Again", "/x")).unwrap_err();

    assert_eq!(err, DomainError::DuplicateKey("c".into()));
    assert_eq!(menu.build(), before);
    assert_eq!(menu.export_source(DEFAULT_MENU_ID).cloned(), exported_before);
}

#[test]
fn given_empty_anchor_when_insert_then_fails() {
    let mut menu = MenuBuilder::new();
    let err = menu.insert("x", Link::new("/x", ""), None, 50).unwrap_err();
    assert_eq!(err, DomainError::EmptyAnchor("x".into()));
    assert!(menu.build().is_empty());
}

#[test]
fn given_unknown_parent_when_insert_then_parent_not_found() {
    let mut menu = MenuBuilder::new();
    let err = menu
        .add_item(NewItem::new("x", "X", "/x").parent("missing"))
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::ParentNotFound {
            key: "x".into(),
            parent: "missing".into()
        }
    );
    assert!(menu.lookup("x").is_none());
    assert!(menu.export_source(DEFAULT_MENU_ID).is_none());
}

#[test]
fn given_same_key_in_two_menus_when_insert_then_both_succeed() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("home", "Home", "/")).unwrap();
    menu.set_current_id("footer");
    menu.add_item(NewItem::new("home", "Footer home", "/"))
        .unwrap();

    assert_eq!(menu.link("home").map(Link::anchor), Some("Footer home"));
    menu.set_current_id(DEFAULT_MENU_ID);
    assert_eq!(menu.link("home").map(Link::anchor), Some("Home"));
}

// ============================================================
// Ordering
// ============================================================

#[test]
fn given_lighter_sibling_inserted_later_when_build_then_sorts_first() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("home", "Home", "/").weight(50))
        .unwrap();
    menu.add_item(NewItem::new("solutions", "Solutions", "/s").weight(30))
        .unwrap();
    assert_eq!(keys(&menu.build()), ["solutions", "home"]);
}

#[test]
fn given_equal_weights_when_build_twice_then_insertion_order_is_kept_and_stable() {
    let mut menu = MenuBuilder::new();
    for key in ["e", "d", "c", "b", "a"] {
        menu.add_item(NewItem::new(key, key, "/")).unwrap();
    }
    menu.add_item(NewItem::new("neg", "Neg", "/").weight(-1))
        .unwrap();

    let first = menu.build();
    let second = menu.build();
    assert_eq!(first, second);
    assert_eq!(keys(&first), ["neg", "e", "d", "c", "b", "a"]);
}

#[test]
fn given_nested_weights_when_build_then_every_level_is_sorted() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("root", "Root", "/")).unwrap();
    menu.add_item(NewItem::new("z", "Z", "/z").parent("root").weight(90))
        .unwrap();
    menu.add_item(NewItem::new("y", "Y", "/y").parent("root").weight(10))
        .unwrap();
    menu.add_item(NewItem::new("y2", "Y2", "/y2").parent("y").weight(5))
        .unwrap();
    menu.add_item(NewItem::new("y1", "Y1", "/y1").parent("y").weight(1))
        .unwrap();

    let built = menu.build();
    assert_eq!(keys(&built[0].children), ["y", "z"]);
    let y = find_item(&built, "y").unwrap();
    assert_eq!(keys(&y.children), ["y1", "y2"]);
}

// ============================================================
// Remove
// ============================================================

#[test]
fn given_parent_when_remove_then_descendants_are_gone() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("a", "A", "/a")).unwrap();
    menu.add_item(NewItem::new("b", "B", "/b").parent("a")).unwrap();
    menu.add_item(NewItem::new("c", "C", "/c").parent("b")).unwrap();
    menu.add_item(NewItem::new("d", "D", "/d")).unwrap();

    menu.remove("a");

    for key in ["a", "b", "c"] {
        assert!(menu.lookup(key).is_none(), "{key} should be removed");
    }
    assert_eq!(keys(&menu.build()), ["d"]);
    let exported = menu.export_source(DEFAULT_MENU_ID).unwrap();
    assert_eq!(exported.keys().collect::<Vec<_>>(), ["d"]);
}

#[test]
fn given_absent_key_when_remove_then_noop() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("a", "A", "/a")).unwrap();
    menu.remove("missing");
    menu.remove("missing");
    assert_eq!(keys(&menu.build()), ["a"]);
}

#[test]
fn given_removed_key_when_reinserted_then_allowed() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("a", "A", "/a")).unwrap();
    menu.remove("a");
    menu.add_item(NewItem::new("a", "A again", "/a")).unwrap();
    assert_eq!(menu.link("a").map(Link::anchor), Some("A again"));
}

// ============================================================
// Attributes / activation
// ============================================================

#[test]
fn given_item_when_activate_twice_then_class_active_once() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("home", "Home", "/")).unwrap();

    menu.activate("home").unwrap();
    menu.activate("home").unwrap();

    let link = menu.link("home").unwrap();
    assert_eq!(link.attribute("class"), Some("active"));
    assert_eq!(link.render(), r#"<a href="/" class="active">Home</a>"#);
}

#[test]
fn given_existing_class_when_activate_then_appends_token() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("home", "Home", "/").attribute("class", "big"))
        .unwrap();
    menu.activate("home").unwrap();
    assert_eq!(menu.link("home").unwrap().attribute("class"), Some("big active"));
}

#[rstest]
#[case("id", "first", "second", "second")]
#[case("class", "a", "b", "a b")]
#[case("class", "a b", "b", "a b")]
fn given_attribute_when_merged_again_then_follows_token_rules(
    #[case] name: &str,
    #[case] first: &str,
    #[case] second: &str,
    #[case] expected: &str,
) {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("x", "X", "/x")).unwrap();
    menu.merge_attribute("x", name, first).unwrap();
    menu.merge_attribute("x", name, second).unwrap();
    assert_eq!(menu.link("x").unwrap().attribute(name), Some(expected));
}

#[test]
fn given_rel_attribute_when_merged_then_goes_to_rels() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("x", "X", "/x").rel("nofollow"))
        .unwrap();
    menu.merge_attribute("x", "rel", "noopener").unwrap();
    assert_eq!(menu.link("x").unwrap().rels(), ["nofollow", "noopener"]);
}

#[rstest]
#[case::merge(true)]
#[case::activate(false)]
fn given_missing_key_when_mutating_then_key_not_found(#[case] merge: bool) {
    let mut menu = MenuBuilder::new();
    let err = if merge {
        menu.merge_attribute("nope", "id", "x").unwrap_err()
    } else {
        menu.activate("nope").unwrap_err()
    };
    assert_eq!(err, DomainError::KeyNotFound("nope".into()));
}

#[test]
fn given_link_captured_before_activate_when_activated_then_capture_is_unchanged() {
    let mut menu = MenuBuilder::new();
    menu.add_item(NewItem::new("home", "Home", "/")).unwrap();
    let snapshot = menu.build();
    menu.activate("home").unwrap();
    assert_eq!(snapshot[0].link.attribute("class"), None);
}

// ============================================================
// Menu selection
// ============================================================

#[test]
fn given_new_builder_when_created_then_default_menu_is_current() {
    let menu = MenuBuilder::new();
    assert_eq!(menu.current_id(), DEFAULT_MENU_ID);
    assert_eq!(menu.menu_ids(), [DEFAULT_MENU_ID]);
}

#[test]
fn given_unseen_id_when_set_current_then_created_lazily() {
    let mut menu = MenuBuilder::new();
    menu.set_current_id("side");
    menu.set_current_id("side");
    assert_eq!(menu.menu_ids(), [DEFAULT_MENU_ID, "side"]);
    assert!(menu.build().is_empty());
}

#[test]
fn given_multiple_menus_when_reset_then_only_empty_default_remains() {
    let mut menu = html_builder();
    menu.add_item(NewItem::new("a", "A", "/a")).unwrap();
    menu.set_current_id("side");
    menu.add_item(NewItem::new("b", "B", "/b")).unwrap();

    menu.reset();

    assert_eq!(menu.menu_ids(), [DEFAULT_MENU_ID]);
    assert_eq!(menu.current_id(), DEFAULT_MENU_ID);
    assert!(menu.build().is_empty());
    assert!(menu.export_all().is_empty());
    assert!(menu.renderer_options().is_ok(), "reset keeps the renderer");
}

#[test]
fn given_url_vars_when_add_item_then_all_placeholders_replaced() {
    let mut menu = MenuBuilder::new();
    menu.set_url_replace_var("host", "https://example.com");
    menu.set_url_replace_var("lang", "en");
    menu.add_item(NewItem::new("docs", "Docs", "{host}/{lang}/docs/{unknown}"))
        .unwrap();
    assert_eq!(
        menu.link("docs").map(Link::href),
        Some("https://example.com/en/docs/{unknown}")
    );
}
