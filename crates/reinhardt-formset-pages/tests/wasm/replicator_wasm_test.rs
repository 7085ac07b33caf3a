//! Browser tests for the form replicator
//!
//! Run with `wasm-pack test --headless --chrome crates/reinhardt-formset-pages`.

#![cfg(target_arch = "wasm32")]

use reinhardt_formset_core::FormsetConfig;
use reinhardt_formset_pages::{FormReplicator, ReplicatorError};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const JOB_FORMSET: &str = concat!(
	r#"<form>"#,
	r#"<input type="hidden" name="form-TOTAL_FORMS" value="1" id="id_form-TOTAL_FORMS">"#,
	r#"<div id="form-container">"#,
	r#"<div class="job-form">"#,
	r#"<label for="id_form-0-jobId">Job ID (form-0-jobId)</label>"#,
	r#"<input type="text" name="form-0-jobId" id="id_form-0-jobId">"#,
	r#"<p id="id_form-0-jobId_helptext">Unique per form.</p>"#,
	r#"<input type="text" name="form-0-jobType" id="id_form-0-jobType" aria-describedby="id_form-0-jobId_helptext">"#,
	r#"</div>"#,
	r#"</div>"#,
	r#"<button type="button" id="add-form">Add another</button>"#,
	r#"</form>"#,
);

fn document_with(markup: &str) -> Document {
	let document = web_sys::window().unwrap().document().unwrap();
	document.body().unwrap().set_inner_html(markup);
	document
}

fn click_add(document: &Document) {
	click_add_by_id(document, "add-form");
}

fn click_add_by_id(document: &Document, id: &str) {
	document
		.get_element_by_id(id)
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap()
		.click();
}

fn total_forms(document: &Document) -> String {
	document
		.get_element_by_id("id_form-TOTAL_FORMS")
		.unwrap()
		.dyn_into::<HtmlInputElement>()
		.unwrap()
		.value()
}

fn container_len(document: &Document) -> u32 {
	document
		.get_element_by_id("form-container")
		.unwrap()
		.child_element_count()
}

#[wasm_bindgen_test]
fn test_click_appends_reindexed_form() {
	let document = document_with(JOB_FORMSET);
	let _handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	click_add(&document);

	assert_eq!(container_len(&document), 2);
	assert_eq!(total_forms(&document), "2");

	let added = document
		.get_element_by_id("form-container")
		.unwrap()
		.last_element_child()
		.unwrap();
	let input = added.query_selector("input").unwrap().unwrap();
	assert_eq!(input.get_attribute("name").as_deref(), Some("form-1-jobId"));
	assert_eq!(input.id(), "id_form-1-jobId");
	let label = added.query_selector("label").unwrap().unwrap();
	assert_eq!(label.get_attribute("for").as_deref(), Some("id_form-1-jobId"));
	let described = added.query_selector("[aria-describedby]").unwrap().unwrap();
	assert_eq!(
		described.get_attribute("aria-describedby").as_deref(),
		Some("id_form-1-jobId_helptext")
	);
	// Text content is never rewritten
	assert_eq!(label.text_content().as_deref(), Some("Job ID (form-0-jobId)"));
}

#[wasm_bindgen_test]
fn test_id_references_follow_renumbered_ids() {
	let document = document_with(concat!(
		r#"<input type="hidden" value="1" id="id_form-TOTAL_FORMS">"#,
		r#"<div id="form-container"><div>"#,
		r#"<span id="id_form-0-city_label">City</span>"#,
		r##"<input name="form-0-city" list="id_form-0-city_options" aria-labelledby="id_form-0-city_label" data-target="#id_form-0-city">"##,
		r#"<datalist id="id_form-0-city_options"><option value="form-0-literal"></option></datalist>"#,
		r#"</div></div>"#,
		r#"<button type="button" id="add-form">Add</button>"#,
	));
	let _handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	click_add(&document);

	let added = document
		.get_element_by_id("form-container")
		.unwrap()
		.last_element_child()
		.unwrap();
	let input = added.query_selector("input").unwrap().unwrap();
	assert_eq!(input.get_attribute("list").as_deref(), Some("id_form-1-city_options"));
	assert_eq!(
		input.get_attribute("aria-labelledby").as_deref(),
		Some("id_form-1-city_label")
	);
	assert_eq!(input.get_attribute("data-target").as_deref(), Some("#id_form-1-city"));
	assert!(document.get_element_by_id("id_form-1-city_options").is_some());
	assert!(document.get_element_by_id("id_form-1-city_label").is_some());
	// Attribute values are markup too, so option values follow the index
	let option = added.query_selector("option").unwrap().unwrap();
	assert_eq!(option.get_attribute("value").as_deref(), Some("form-1-literal"));
}

#[wasm_bindgen_test]
fn test_configured_attributes_limit_rewrite() {
	let document = document_with(JOB_FORMSET);
	let config = FormsetConfig::default().with_indexed_attributes(["name"]);
	let _handle = FormReplicator::new(config).attach(&document).unwrap();

	click_add(&document);

	let added = document
		.get_element_by_id("form-container")
		.unwrap()
		.last_element_child()
		.unwrap();
	let input = added.query_selector("input").unwrap().unwrap();
	assert_eq!(input.get_attribute("name").as_deref(), Some("form-1-jobId"));
	assert_eq!(input.id(), "id_form-0-jobId");
}

#[wasm_bindgen_test]
fn test_repeated_clicks_use_distinct_indices() {
	let document = document_with(JOB_FORMSET);
	let _handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	click_add(&document);
	click_add(&document);
	click_add(&document);

	assert_eq!(container_len(&document), 4);
	assert_eq!(total_forms(&document), "4");
	assert!(document.get_element_by_id("id_form-3-jobType").is_some());
	// The first block is the clone source every time
	assert!(document.get_element_by_id("id_form-0-jobType").is_some());
}

#[wasm_bindgen_test]
fn test_non_numeric_counter_is_reconciled() {
	let document = document_with(JOB_FORMSET);
	document
		.get_element_by_id("id_form-TOTAL_FORMS")
		.unwrap()
		.dyn_into::<HtmlInputElement>()
		.unwrap()
		.set_value("NaN");
	let _handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	click_add(&document);

	assert_eq!(total_forms(&document), "2");
	assert!(document.get_element_by_id("id_form-1-jobId").is_some());
	assert!(document.get_element_by_id("id_form-NaN-jobId").is_none());
}

#[wasm_bindgen_test]
fn test_handle_add_form_without_click() {
	let document = document_with(JOB_FORMSET);
	let handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	assert_eq!(handle.add_form().unwrap(), 1);
	assert_eq!(handle.add_form().unwrap(), 2);
	assert_eq!(handle.host().borrow().container().child_element_count(), 3);
}

#[wasm_bindgen_test]
fn test_dropped_handle_removes_listener() {
	let document = document_with(JOB_FORMSET);
	let handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();
	drop(handle);

	click_add(&document);

	assert_eq!(container_len(&document), 1);
	assert_eq!(total_forms(&document), "1");
}

#[wasm_bindgen_test]
fn test_custom_prefix_and_ids() {
	let document = document_with(concat!(
		r#"<input type="hidden" name="jobs-TOTAL_FORMS" value="1" id="jobs-total">"#,
		r#"<ul id="jobs"><li><input name="jobs-0-title" id="id_jobs-0-title"></li></ul>"#,
		r##"<a href="#jobs" id="more-jobs">More</a>"##,
	));
	let config = FormsetConfig::default()
		.with_prefix("jobs")
		.with_add_button_id("more-jobs")
		.with_container_id("jobs")
		.with_total_forms_id("jobs-total");
	let _handle = FormReplicator::new(config).attach(&document).unwrap();

	click_add_by_id(&document, "more-jobs");

	assert!(document.get_element_by_id("id_jobs-1-title").is_some());
	assert_eq!(
		document
			.get_element_by_id("jobs-total")
			.unwrap()
			.dyn_into::<HtmlInputElement>()
			.unwrap()
			.value(),
		"2"
	);
}

#[wasm_bindgen_test]
fn test_missing_elements_are_reported() {
	let document = document_with(r#"<div id="form-container"></div>"#);

	let err = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap_err();
	assert!(matches!(err, ReplicatorError::MissingElement { ref id } if id == "add-form"));

	let document = document_with(concat!(
		r#"<div id="form-container"></div>"#,
		r#"<button id="add-form">Add</button>"#,
	));
	let err = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap_err();
	assert!(
		matches!(err, ReplicatorError::MissingElement { ref id } if id == "id_form-TOTAL_FORMS")
	);
}

#[wasm_bindgen_test]
fn test_counter_must_be_an_input() {
	let document = document_with(concat!(
		r#"<span id="id_form-TOTAL_FORMS">1</span>"#,
		r#"<div id="form-container"><div><input name="form-0-a"></div></div>"#,
		r#"<button id="add-form">Add</button>"#,
	));

	let err = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap_err();
	assert!(matches!(err, ReplicatorError::NotAnInput { .. }));
}

#[wasm_bindgen_test]
fn test_empty_container_leaves_page_unchanged() {
	let document = document_with(concat!(
		r#"<input type="hidden" value="0" id="id_form-TOTAL_FORMS">"#,
		r#"<div id="form-container"></div>"#,
		r#"<button type="button" id="add-form">Add</button>"#,
	));
	let handle = FormReplicator::new(FormsetConfig::default())
		.attach(&document)
		.unwrap();

	click_add(&document);

	assert_eq!(container_len(&document), 0);
	assert_eq!(total_forms(&document), "0");
	assert!(handle.add_form().is_err());
}
