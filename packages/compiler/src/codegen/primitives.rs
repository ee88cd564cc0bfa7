//! Primitive emitter
//!
//! One constructor per render primitive. Each builds a call to the primitive's local alias and
//! records the primitive as used, so assembly only destructures what the template needs.

use crate::codegen::identifiers::Primitive;
use crate::codegen::CodegenContext;
use crate::output::output_ast::{literal, literal_arr, variable, Expression};

impl CodegenContext<'_> {
    fn call_primitive(&mut self, primitive: Primitive, args: Vec<Expression>) -> Expression {
        self.record_primitive(primitive);
        variable(primitive.local_name()).call_fn(args)
    }

    pub fn gen_element(&mut self, tag: &str, data: Expression, children: Expression) -> Expression {
        self.call_primitive(Primitive::Element, vec![literal(tag), data, children])
    }

    pub fn gen_custom_element(
        &mut self,
        tag: &str,
        constructor: &str,
        data: Expression,
        children: Expression,
    ) -> Expression {
        self.call_primitive(
            Primitive::CustomElement,
            vec![literal(tag), variable(constructor), data, children],
        )
    }

    pub fn gen_dynamic_element(
        &mut self,
        tag: &str,
        constructor: Expression,
        data: Expression,
        children: Expression,
    ) -> Expression {
        self.call_primitive(
            Primitive::DynamicElement,
            vec![literal(tag), constructor, data, children],
        )
    }

    pub fn gen_text(&mut self, value: Expression) -> Expression {
        self.call_primitive(Primitive::Text, vec![value])
    }

    pub fn gen_dynamic_text(&mut self, value: Expression) -> Expression {
        self.call_primitive(Primitive::DynamicText, vec![value])
    }

    pub fn gen_comment(&mut self, value: &str) -> Expression {
        self.call_primitive(Primitive::Comment, vec![literal(value)])
    }

    pub fn gen_iterator(&mut self, iterable: Expression, callback: Expression) -> Expression {
        self.call_primitive(Primitive::Iterator, vec![iterable, callback])
    }

    pub fn gen_flatten(&mut self, children: Vec<Expression>) -> Expression {
        self.call_primitive(Primitive::Flatten, vec![literal_arr(children)])
    }

    pub fn gen_key(&mut self, discriminator: usize, value: Expression) -> Expression {
        self.call_primitive(Primitive::Key, vec![literal(discriminator), value])
    }

    pub fn gen_bind(&mut self, handler: Expression) -> Expression {
        self.call_primitive(Primitive::Bind, vec![handler])
    }

    pub fn gen_tab_index(&mut self, value: Expression) -> Expression {
        self.call_primitive(Primitive::TabIndex, vec![value])
    }

    pub fn gen_scoped_id(&mut self, value: Expression) -> Expression {
        self.call_primitive(Primitive::ScopedId, vec![value])
    }

    pub fn gen_scoped_frag_id(&mut self, value: Expression) -> Expression {
        self.call_primitive(Primitive::ScopedFragmentId, vec![value])
    }

    pub fn gen_slot(
        &mut self,
        name: &str,
        data: Expression,
        fallback: Expression,
        slot_local: &str,
    ) -> Expression {
        self.call_primitive(
            Primitive::Slot,
            vec![literal(name), data, fallback, variable(slot_local)],
        )
    }

    pub fn gen_sanitize_attribute(
        &mut self,
        tag: &str,
        namespace_uri: &str,
        attr: &str,
        value: Expression,
    ) -> Expression {
        self.call_primitive(
            Primitive::SanitizeAttribute,
            vec![literal(tag), literal(namespace_uri), literal(attr), value],
        )
    }
}
