//! Component constructors, dynamic components and slots

#[path = "../util.rs"]
mod util;

use template_compiler::CompilerConfig;
use util::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_import_component_constructor_in_module_format() {
        let root = template(vec![component("x-foo-bar")
            .with_property("label", bound("title"))
            .into()]);
        let compiled = compile_with(&root, &CompilerConfig::default());
        assert_eq!(
            compiled.code,
            "import _xFooBar from 'x/fooBar';\n\nfunction tmpl($api, $cmp, $slotset, $ctx) {\n  const {c: api_custom_element} = $api;\n  return [api_custom_element('x-foo-bar', _xFooBar, {props: {label: $cmp.title}, key: 0}, [])];\n}\n\nexport default tmpl;\ntmpl.stylesheets = [];"
        );
        assert_eq!(compiled.components.len(), 1);
        assert_eq!(compiled.components[0].source, "x/fooBar");
    }

    #[test]
    fn should_import_each_component_once_in_first_use_order() {
        let root = template(vec![
            component("x-list").into(),
            component("x-item").into(),
            component("x-list").into(),
        ]);
        let compiled = compile_with(&root, &CompilerConfig::default());
        assert!(compiled
            .code
            .starts_with("import _xList from 'x/list';\nimport _xItem from 'x/item';\n\nfunction tmpl("));
        let tags: Vec<_> = compiled.components.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["x-list", "x-item"]);
    }

    #[test]
    fn should_not_emit_imports_in_function_format() {
        let root = template(vec![component("x-foo").into()]);
        let code = compile_fn(&root);
        assert!(code.starts_with("function tmpl("));
        assert!(code.contains("api_custom_element('x-foo', _xFoo, {key: 0}, [])"));
    }

    #[test]
    fn should_render_dynamic_component_with_bound_constructor() {
        let root = template(vec![component("x-dynamic").with_dynamic(expr("ctor")).into()]);
        let compiled = compile_with(&root, &CompilerConfig::default());
        assert!(compiled
            .code
            .contains("const {dc: api_dynamic_component} = $api;"));
        assert!(compiled
            .code
            .contains("return [api_dynamic_component('x-dynamic', $cmp.ctor, {key: 0}, [])];"));
        assert!(compiled.components.is_empty());
        assert!(!compiled.code.starts_with("import"));
    }

    #[test]
    fn should_bind_slots_from_the_slot_set() {
        let root = template(vec![
            slot(None).with_child(el("p").with_child(text("fallback"))).into(),
            slot(Some("header")).into(),
        ]);
        let compiled = compile_with(&root, &CompilerConfig::function());
        assert_eq!(
            compiled.code,
            "function tmpl($api, $cmp, $slotset, $ctx) {\n  const {t: api_text, h: api_element, s: api_slot} = $api;\n  const {'': $slot_default, header: $slot_header} = $slotset;\n  return [api_slot('', {key: 0}, [api_element('p', {key: 1}, [api_text('fallback')])], $slot_default), api_slot('header', {attrs: {name: 'header'}, key: 2}, [], $slot_header)];\n}\n\ntmpl.stylesheets = [];\ntmpl.slots = ['', 'header'];"
        );
        assert_eq!(compiled.slots, vec!["".to_string(), "header".to_string()]);
    }

    #[test]
    fn should_declare_each_slot_once() {
        let root = template(vec![
            slot(Some("footer")).into(),
            slot(Some("footer")).into(),
        ]);
        let compiled = compile_with(&root, &CompilerConfig::function());
        assert_eq!(compiled.slots, vec!["footer".to_string()]);
        assert!(compiled.code.contains("const {footer: $slot_footer} = $slotset;"));
        assert!(compiled.code.ends_with("tmpl.slots = ['footer'];"));
    }

    #[test]
    fn should_give_slots_with_similar_names_distinct_locals() {
        let root = template(vec![
            slot(Some("a-b")).into(),
            slot(Some("a_b")).into(),
        ]);
        let compiled = compile_with(&root, &CompilerConfig::function());
        assert!(compiled
            .code
            .contains("const {'a-b': $slot_a_b, a_b: $slot_a_b_1} = $slotset;"));
        assert!(compiled
            .code
            .contains("api_slot('a-b', {attrs: {name: 'a-b'}, key: 0}, [], $slot_a_b)"));
        assert!(compiled
            .code
            .contains("api_slot('a_b', {attrs: {name: 'a_b'}, key: 1}, [], $slot_a_b_1)"));
    }

    #[test]
    fn should_render_slot_fallback_inside_helpers() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "row", None)
                    .with_child(slot(Some("row"))),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  const {row: $slot_row} = $slotset;\n"));
        assert!(code.contains("api_slot('row', {attrs: {name: 'row'}, key: 2}, [], $slot_row)"));
    }
}
