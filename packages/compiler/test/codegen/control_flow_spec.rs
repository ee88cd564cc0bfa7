//! Conditional and iteration lowering

#[path = "../util.rs"]
mod util;

use template_compiler::ir::IfKind;
use util::*;

fn guarded(modifier: &str) -> String {
    let root = template(vec![el("p")
        .with_if(IfKind::If, modifier, Some(expr("visible")))
        .with_child(text("on"))
        .into()]);
    compile_fn(&root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_truthy_conditional_in_helper() {
        assert_eq!(
            guarded("true"),
            "function tmpl($api, $cmp, $slotset, $ctx) {\n  const {t: api_text, h: api_element} = $api;\n  function if1($test) {\n    return ($test ? api_element('p', {key: 0}, [api_text('on')]) : null);\n  }\n  return [if1($cmp.visible)];\n}\n\ntmpl.stylesheets = [];"
        );
    }

    #[test]
    fn should_negate_test_for_false_modifier() {
        assert!(guarded("false").contains("return (!$test ? api_element('p', {key: 0}, [api_text('on')]) : null);"));
    }

    #[test]
    fn should_compare_strictly_for_strict_true_modifier() {
        assert!(guarded("strict-true").contains("return ($test === true ? api_element('p', {key: 0}, [api_text('on')]) : null);"));
    }

    #[test]
    fn should_nest_else_if_and_else_helpers() {
        let root = template(vec![
            el("p")
                .with_if(IfKind::If, "true", Some(expr("a")))
                .with_child(text("A"))
                .into(),
            el("p")
                .with_if(IfKind::ElseIf, "true", Some(expr("b")))
                .with_child(text("B"))
                .into(),
            el("p").with_if(IfKind::Else, "true", None).with_child(text("C")).into(),
        ]);
        assert_eq!(
            compile_fn(&root),
            "function tmpl($api, $cmp, $slotset, $ctx) {\n  const {t: api_text, h: api_element} = $api;\n  function if1($test) {\n    function if2($test) {\n      function if3() {\n        return api_element('p', {key: 2}, [api_text('C')]);\n      }\n      return ($test ? api_element('p', {key: 1}, [api_text('B')]) : if3());\n    }\n    return ($test ? api_element('p', {key: 0}, [api_text('A')]) : if2($cmp.b));\n  }\n  return [if1($cmp.a)];\n}\n\ntmpl.stylesheets = [];"
        );
    }

    #[test]
    fn should_shape_falsy_placeholder_to_fixed_length_fragment() {
        let root = template(vec![fragment()
            .with_if(IfKind::If, "true", Some(expr("show")))
            .with_child(el("p").with_child(text("a")))
            .with_child(el("p").with_child(text("b")))
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("return ($test ? [api_element('p', {key: 0}, [api_text('a')]), api_element('p', {key: 1}, [api_text('b')])] : [null, null]);"));
        assert!(code.contains("  return if1($cmp.show);\n"));
    }

    #[test]
    fn should_flatten_conditional_fragment_mixed_with_nodes() {
        let root = template(vec![
            el("h1").into(),
            fragment()
                .with_if(IfKind::If, "true", Some(expr("show")))
                .with_child(el("p"))
                .into(),
        ]);
        let code = compile_fn(&root);
        assert!(code.contains("return ($test ? [api_element('p', {key: 1}, [])] : [null]);"));
        assert!(code.contains("return api_flatten([api_element('h1', {key: 0}, []), if1($cmp.show)]);"));
    }

    #[test]
    fn should_pass_index_to_for_each_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "row", Some("i"))
                    .with_child(mixed_text("#", "i")),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  function forEach1(row, i) {\n    return api_element('li', {key: 1}, [api_text('#' + api_dynamic_text(i))]);\n  }\n"));
        assert!(code.contains("return [api_element('ul', {key: 0}, api_iterator($cmp.rows, forEach1))];"));
    }

    #[test]
    fn should_gather_for_of_parameters_into_iterator_object() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_of(expr("items"), "it")
                    .with_key(expr("it.value.id"))
                    .with_child(text_expr("it.value.name")),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  function forOf1($it_value, $it_index, $it_first, $it_last) {\n    const it = {value: $it_value, index: $it_index, first: $it_first, last: $it_last};\n    return api_element('li', {key: api_key(1, it.value.id)}, [api_text(api_dynamic_text(it.value.name))]);\n  }\n"));
        assert!(code.contains("api_iterator($cmp.items, forOf1)"));
    }

    #[test]
    fn should_evaluate_conditional_per_item_inside_iteration_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "item", None)
                    .with_if(IfKind::If, "true", Some(expr("item.visible")))
                    .with_child(text_expr("item.name")),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  function forEach1(item) {\n    function if2($test) {\n      return ($test ? api_element('li', {key: 1}, [api_text(api_dynamic_text(item.name))]) : null);\n    }\n    return if2(item.visible);\n  }\n"));
    }

    #[test]
    fn should_place_inner_helper_textually_inside_outer_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li").with_for_each(expr("rows"), "row", None).with_child(
                    el("span")
                        .with_if(IfKind::If, "true", Some(expr("row.visible")))
                        .with_child(text("x")),
                ),
            )
            .into()]);
        let code = compile_fn(&root);
        let outer = code.find("function forEach1(row) {").expect("outer helper");
        let inner = code.find("function if2($test) {").expect("inner helper");
        let outer_end = code.find("    return api_element('li'").expect("outer body");
        assert!(outer < inner && inner < outer_end);
    }

    #[test]
    fn should_keep_loop_item_named_test_visible_inside_conditional_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li").with_for_each(expr("rows"), "test", None).with_child(
                    el("span")
                        .with_if(IfKind::If, "true", Some(expr("test.visible")))
                        .with_child(text_expr("test.label")),
                ),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  function forEach1(test) {\n    function if2($test) {\n      return ($test ? api_element('span', {key: 2}, [api_text(api_dynamic_text(test.label))]) : null);\n    }\n"));
        assert!(code.contains("return api_element('li', {key: 1}, [if2(test.visible)]);"));
    }

    #[test]
    fn should_keep_outer_loop_item_visible_inside_for_of_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li").with_for_each(expr("rows"), "rowValue", None).with_child(
                    el("span")
                        .with_for_of(expr("rowValue.cells"), "row")
                        .with_child(text_expr("rowValue.title")),
                ),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("function forOf2($row_value, $row_index, $row_first, $row_last) {"));
        assert!(code.contains("const row = {value: $row_value, index: $row_index, first: $row_first, last: $row_last};"));
        assert!(code.contains("return api_element('span', {key: 2}, [api_text(api_dynamic_text(rowValue.title))]);"));
        assert!(code.contains("api_iterator(rowValue.cells, forOf2)"));
    }

    #[test]
    fn should_not_chain_across_comments() {
        let root = template(vec![
            el("p").with_if(IfKind::If, "true", Some(expr("a"))).into(),
            comment("gap").into(),
            el("p").with_if(IfKind::Else, "true", None).into(),
        ]);
        assert!(template_compiler::compile_template(&root, &template_compiler::CompilerConfig::default()).is_err());
    }
}
