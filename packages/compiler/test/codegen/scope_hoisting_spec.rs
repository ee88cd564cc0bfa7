//! Property hoisting across helper scopes

#[path = "../util.rs"]
mod util;

use template_compiler::ir::IfKind;
use util::*;

fn hoist_count(code: &str) -> usize {
    code.matches("} = $cmp;").count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_single_use_property_off_the_component() {
        let code = compile_fn(&template(vec![el("h1").with_child(text_expr("title")).into()]));
        assert!(code.contains("api_dynamic_text($cmp.title)"));
        assert_eq!(hoist_count(&code), 0);
    }

    #[test]
    fn should_hoist_property_read_twice_in_the_same_scope() {
        let root = template(vec![
            el("h1").with_child(text_expr("title")).into(),
            el("p").with_child(text_expr("title")).into(),
        ]);
        assert_eq!(
            compile_fn(&root),
            "function tmpl($api, $cmp, $slotset, $ctx) {\n  const {d: api_dynamic_text, t: api_text, h: api_element} = $api;\n  const {title: $cv0_0} = $cmp;\n  return [api_element('h1', {key: 0}, [api_text(api_dynamic_text($cv0_0))]), api_element('p', {key: 1}, [api_text(api_dynamic_text($cv0_0))])];\n}\n\ntmpl.stylesheets = [];"
        );
    }

    #[test]
    fn should_hoist_into_parent_when_a_descendant_reads_the_property() {
        let root = template(vec![
            el("h1").with_child(text_expr("title")).into(),
            el("ul")
                .with_child(
                    el("li")
                        .with_for_each(expr("rows"), "row", None)
                        .with_child(text_expr("title")),
                )
                .into(),
        ]);
        let code = compile_fn(&root);
        assert!(code.contains("  const {title: $cv0_0} = $cmp;\n  function forEach1(row) {\n    return api_element('li', {key: 2}, [api_text(api_dynamic_text($cv0_0))]);\n  }\n"));
        assert!(code.contains("api_iterator($cmp.rows, forEach1)"));
        assert_eq!(hoist_count(&code), 1);
    }

    #[test]
    fn should_hoist_inside_helper_when_only_the_helper_reuses_the_property() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "row", None)
                    .with_child(text_expr("label"))
                    .with_child(text_expr("label")),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("  function forEach1(row) {\n    const {label: $cv1_0} = $cmp;\n    return api_element('li', {key: 1}, [api_text(api_dynamic_text($cv1_0)), api_text(api_dynamic_text($cv1_0))]);\n  }\n"));
        assert_eq!(hoist_count(&code), 1);
    }

    #[test]
    fn should_not_hoist_a_single_read_inside_a_helper() {
        let root = template(vec![el("ul")
            .with_child(
                el("li")
                    .with_for_each(expr("rows"), "row", None)
                    .with_child(text_expr("label")),
            )
            .into()]);
        let code = compile_fn(&root);
        assert!(code.contains("api_dynamic_text($cmp.label)"));
        assert_eq!(hoist_count(&code), 0);
    }

    #[test]
    fn should_reuse_ancestor_alias_through_several_levels() {
        let root = template(vec![
            el("h1").with_child(text_expr("name")).into(),
            el("ul")
                .with_child(
                    el("li").with_for_each(expr("rows"), "row", None).with_child(
                        el("span")
                            .with_if(IfKind::If, "true", Some(expr("row.show")))
                            .with_child(text_expr("name")),
                    ),
                )
                .into(),
        ]);
        let code = compile_fn(&root);
        assert!(code.contains("  const {name: $cv0_0} = $cmp;\n"));
        assert!(code.contains("      return ($test ? api_element('span', {key: 3}, [api_text(api_dynamic_text($cv0_0))]) : null);\n"));
        assert!(code.contains("    return api_element('li', {key: 2}, [if2(row.show)]);\n"));
        assert_eq!(hoist_count(&code), 1);
    }

    #[test]
    fn should_not_hoist_into_sibling_helpers() {
        let list = |iterable: &str| {
            el("li")
                .with_for_each(expr(iterable), "row", None)
                .with_child(text_expr("label"))
                .with_child(text_expr("label"))
        };
        let root = template(vec![el("ul").with_child(list("a")).with_child(list("b")).into()]);
        let code = compile_fn(&root);
        assert!(code.contains("function forEach1(row) {\n    const {label: $cv1_0} = $cmp;"));
        assert!(code.contains("function forEach2(row) {\n    const {label: $cv2_0} = $cmp;"));
        assert_eq!(hoist_count(&code), 2);
        assert!(code.contains("api_flatten([api_iterator($cmp.a, forEach1), api_iterator($cmp.b, forEach2)])"));
    }
}
