//! Attribute, property and listener lowering into element data bags

#[path = "../util.rs"]
mod util;

use template_compiler::ir::{AttributeValue, DomMode, Namespace};
use template_compiler::CompilerConfig;
use util::*;

fn single(element: template_compiler::Element) -> String {
    compile_fn(&template(vec![element.into()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_bound_boolean_attribute_as_present_or_absent() {
        let code = single(el("input").with_attribute("hidden", bound("isHidden")));
        assert!(code.contains("api_element('input', {attrs: {hidden: ($cmp.isHidden ? '' : null)}, key: 0}, [])"));
    }

    #[test]
    fn should_render_valueless_attribute_as_empty_string() {
        let code = single(el("input").with_attribute("disabled", AttributeValue::Boolean));
        assert!(code.contains("{attrs: {disabled: ''}, key: 0}"));
    }

    #[test]
    fn should_apply_tabindex_and_spellcheck_rules_when_valueless() {
        let code = single(
            el("div")
                .with_attribute("tabindex", AttributeValue::Boolean)
                .with_attribute("spellcheck", AttributeValue::Boolean),
        );
        assert!(code.contains("const {ti: api_tab_index, h: api_element} = $api;"));
        assert!(code.contains("{attrs: {tabindex: api_tab_index(''), spellcheck: true}, key: 0}"));
    }

    #[test]
    fn should_route_tabindex_through_primitive() {
        let code = single(el("div").with_attribute("tabindex", lit("0")));
        assert!(code.contains("const {ti: api_tab_index, h: api_element} = $api;"));
        assert!(code.contains("{attrs: {tabindex: api_tab_index('0')}, key: 0}"));
    }

    #[test]
    fn should_scope_ids_and_id_references() {
        let code = single(
            el("div")
                .with_attribute("id", lit("main"))
                .with_attribute("aria-labelledby", bound("labelId")),
        );
        assert!(code.contains(
            "{attrs: {id: api_scoped_id('main'), 'aria-labelledby': api_scoped_id($cmp.labelId)}, key: 0}"
        ));
    }

    #[test]
    fn should_scope_fragment_links_only_when_enabled() {
        let root = template(vec![el("a").with_attribute("href", lit("#top")).into()]);
        assert!(compile_fn(&root).contains("{attrs: {href: '#top'}, key: 0}"));

        let config = CompilerConfig {
            scope_fragment_id: true,
            ..CompilerConfig::function()
        };
        let code = compile_with(&root, &config).code;
        assert!(code.contains("{attrs: {href: api_scoped_frag_id('#top')}, key: 0}"));
    }

    #[test]
    fn should_sanitize_svg_use_references() {
        let code = single(
            el("use")
                .with_namespace(Namespace::Svg)
                .with_attribute("xlink:href", lit("#icon")),
        );
        assert!(code.contains(
            "api_element('use', {attrs: {'xlink:href': api_sanitize_attribute('use', 'http://www.w3.org/2000/svg', 'xlink:href', '#icon')}, svg: true, key: 0}, [])"
        ));
    }

    #[test]
    fn should_turn_spellcheck_into_boolean() {
        let code = single(el("textarea").with_attribute("spellcheck", lit("FALSE")));
        assert!(code.contains("{attrs: {spellcheck: false}, key: 0}"));
        let code = single(el("textarea").with_attribute("spellcheck", lit("yes")));
        assert!(code.contains("{attrs: {spellcheck: true}, key: 0}"));
    }

    #[test]
    fn should_set_boolean_properties_to_true() {
        let code = single(
            el("input")
                .with_property("checked", lit(""))
                .with_property("value", bound("value")),
        );
        assert!(code.contains("{props: {checked: true, value: $cmp.value}, key: 0}"));
    }

    #[test]
    fn should_split_static_class_and_style() {
        let code = single(
            el("div")
                .with_attribute("style", lit("color: red; margin-top: 4px"))
                .with_attribute("class", lit("card card-active")),
        );
        assert!(code.contains(
            "{classMap: {card: true, 'card-active': true}, styleMap: {color: 'red', 'margin-top': '4px'}, key: 0}"
        ));
    }

    #[test]
    fn should_pass_dynamic_class_and_style_through() {
        let code = single(
            el("div")
                .with_attribute("class", bound("cls"))
                .with_attribute("style", bound("css")),
        );
        assert!(code.contains("{className: $cmp.cls, style: $cmp.css, key: 0}"));
    }

    #[test]
    fn should_mark_manual_dom_context() {
        let code = single(el("div").with_dom(DomMode::Manual));
        assert!(code.contains("{context: {lwc: {dom: 'manual'}}, key: 0}"));
    }

    #[test]
    fn should_memoize_handlers_on_the_context() {
        let code = single(
            el("button")
                .with_listener("click", expr("handleClick"))
                .with_listener("focus", expr("handleFocus")),
        );
        assert_eq!(
            code,
            "function tmpl($api, $cmp, $slotset, $ctx) {\n  const {b: api_bind, h: api_element} = $api;\n  const {_m0, _m1} = $ctx;\n  return [api_element('button', {key: 0, on: {click: _m0 || ($ctx._m0 = api_bind($cmp.handleClick)), focus: _m1 || ($ctx._m1 = api_bind($cmp.handleFocus))}}, [])];\n}\n\ntmpl.stylesheets = [];"
        );
    }

    #[test]
    fn should_not_memoize_handlers_closing_over_loop_locals() {
        let code = compile_fn(&template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "row", None)
                    .with_listener("click", expr("row.select")),
            )
            .into()]));
        assert!(code.contains("{key: 1, on: {click: api_bind(row.select)}}"));
        assert!(!code.contains("} = $ctx;"));
    }

    #[test]
    fn should_not_reuse_memo_names_shadowed_by_loop_locals() {
        let code = compile_fn(&template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "_m0", None)
                    .with_listener("click", expr("handleClick")),
            )
            .into()]));
        assert!(code.contains("  const {_m1} = $ctx;
"));
        assert!(code.contains("on: {click: _m1 || ($ctx._m1 = api_bind($cmp.handleClick))}"));
        assert!(!code.contains("_m0 ||"));
    }

    #[test]
    fn should_wrap_explicit_keys_with_discriminator() {
        let code = single(el("div").with_key(expr("uid")));
        assert!(code.contains("{key: api_key(0, $cmp.uid)}"));
    }
}
