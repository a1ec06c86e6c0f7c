//! Output escaping and the ordered attribute builder used by field renderers

/// Escape a value placed inside a double-quoted HTML attribute
pub fn esc_attr(value: &str) -> String {
	handlebars::html_escape(value)
}

/// Escape text content (element bodies, including `<textarea>`)
pub fn esc_html(value: &str) -> String {
	handlebars::html_escape(value)
}

/// Ordered set of HTML attributes for one element.
///
/// `add` appends to an attribute (class lists), `set` overwrites it.
/// Attribute order follows first insertion so rendered markup is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderAttributes {
	attrs: Vec<(String, Vec<String>)>,
}

impl RenderAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
		let value = value.into();
		match self.attrs.iter_mut().find(|(k, _)| k == key) {
			Some((_, values)) => {
				if !values.contains(&value) {
					values.push(value);
				}
			}
			None => self.attrs.push((key.to_string(), vec![value])),
		}
		self
	}

	pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
		let value = value.into();
		match self.attrs.iter_mut().find(|(k, _)| k == key) {
			Some((_, values)) => *values = vec![value],
			None => self.attrs.push((key.to_string(), vec![value])),
		}
		self
	}

	pub fn get(&self, key: &str) -> Option<String> {
		self.attrs.iter().find(|(k, _)| k == key).map(|(_, values)| values.join(" "))
	}

	pub fn contains(&self, key: &str) -> bool {
		self.attrs.iter().any(|(k, _)| k == key)
	}

	/// Render as `key="value" key2="value2"`, values attribute-escaped
	pub fn render(&self) -> String {
		self.attrs
			.iter()
			.map(|(key, values)| format!("{}=\"{}\"", key, esc_attr(&values.join(" "))))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_add_accumulates_classes() {
		let mut attrs = RenderAttributes::new();
		attrs.add("class", "elementor-field").add("class", "easy-dragdrop-upload");
		attrs.add("class", "elementor-field");
		assert_eq!(attrs.get("class").as_deref(), Some("elementor-field easy-dragdrop-upload"));
	}

	#[test]
	fn test_set_overwrites() {
		let mut attrs = RenderAttributes::new();
		attrs.set("type", "text").set("type", "file");
		assert_eq!(attrs.render(), r#"type="file""#);
	}

	#[test]
	fn test_render_escapes_and_keeps_order() {
		let mut attrs = RenderAttributes::new();
		attrs.set("name", "form_fields[up]").set("data-label", "Say \"hi\" <now>");
		assert_eq!(
			attrs.render(),
			r#"name="form_fields[up]" data-label="Say &quot;hi&quot; &lt;now&gt;""#
		);
	}
}

// vim: ts=4
