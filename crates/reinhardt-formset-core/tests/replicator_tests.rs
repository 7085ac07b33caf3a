//! Replication behavior observed through the in-memory formset.

use proptest::prelude::*;
use reinhardt_formset_core::{
	BlockElement, BoundFormset, CounterPolicy, FormBlock, FormPrefix, Formset, FormsetError,
	MarkupBlock, Replicator,
};
use rstest::rstest;
use std::collections::HashSet;

const JOB_FORM: &str = concat!(
	r#"<div class="job-form">"#,
	r#"<label for="id_form-0-jobId">Job ID</label>"#,
	r#"<input type="text" name="form-0-jobId" maxlength="100" id="id_form-0-jobId">"#,
	r#"<label for="id_form-0-code_type_0"><input type="radio" name="form-0-code_type" value="sql" id="id_form-0-code_type_0"> SQL Query</label>"#,
	r#"<textarea name="form-0-code" cols="80" rows="10" id="id_form-0-code"></textarea>"#,
	r#"</div>"#,
);

fn job_formset(policy: CounterPolicy) -> Formset<MarkupBlock> {
	let prefix = FormPrefix::default();
	Formset::new(prefix.clone(), MarkupBlock::new(JOB_FORM))
		.with_replicator(Replicator::new(prefix).with_policy(policy))
}

#[rstest]
fn test_single_activation_with_consistent_counter() {
	let mut formset = job_formset(CounterPolicy::Reconcile);

	assert_eq!(formset.add_form().unwrap(), 1);

	assert_eq!(formset.len(), 2);
	assert_eq!(formset.total_forms_raw(), "2");
	let added = formset.blocks()[1].as_str();
	assert!(!added.contains("form-0-"));
	assert_eq!(added.matches("form-1-").count(), 8);
}

#[rstest]
fn test_clone_source_is_always_first_block() {
	let prefix = FormPrefix::default();
	let mut formset = Formset::from_blocks(
		prefix,
		vec![
			MarkupBlock::new(r#"<p class="first"><input name="form-0-a"></p>"#),
			MarkupBlock::new(r#"<p class="second"><input name="form-1-a"></p>"#),
		],
	);

	formset.add_form().unwrap();
	assert_eq!(
		formset.blocks()[2].as_str(),
		r#"<p class="first"><input name="form-2-a"></p>"#
	);
}

#[rstest]
fn test_typed_block_fields_share_new_index() {
	let prefix = FormPrefix::default();
	let template = FormBlock::new(
		BlockElement::new("div")
			.child(BlockElement::label(&prefix, 0, "jobId", "Job ID"))
			.child(BlockElement::input(&prefix, 0, "jobId", "text"))
			.child(BlockElement::input(&prefix, 0, "jobType", "text"))
			.child(BlockElement::input(&prefix, 0, "dateRangeStart", "datetime-local"))
			.child(BlockElement::input(&prefix, 0, "dateRangeEnd", "datetime-local")),
	);
	let mut formset = Formset::new(prefix.clone(), template);

	formset.add_form().unwrap();
	formset.add_form().unwrap();

	let newest = &formset.blocks()[2];
	assert_eq!(newest.indexed_names().len(), 9);
	assert_eq!(newest.index(&prefix), Some(2));
}

#[rstest]
#[case("NaN")]
#[case("")]
#[case("1e3")]
fn test_non_numeric_counter_never_leaks(#[case] counter: &str) {
	let mut formset = job_formset(CounterPolicy::Reconcile);
	formset.set_total_forms_raw(counter);

	assert_eq!(formset.add_form().unwrap(), 1);
	assert!(!formset.blocks()[1].as_str().contains(counter) || counter.is_empty());
	assert_eq!(formset.total_forms_raw(), "2");
}

#[rstest]
fn test_strict_policy_rejects_tampered_counter() {
	let mut formset = job_formset(CounterPolicy::Strict);
	formset.set_total_forms_raw("4");

	assert_eq!(
		formset.add_form(),
		Err(FormsetError::CounterMismatch {
			counter: 4,
			blocks: 1
		})
	);
	assert_eq!(formset.len(), 1);
}

#[rstest]
fn test_added_forms_bind_after_submission() {
	let mut formset = job_formset(CounterPolicy::Reconcile);
	formset.add_form().unwrap();
	formset.add_form().unwrap();

	let management = formset.management_form();
	let prefix = formset.prefix().clone();
	let mut pairs = vec![
		("form-TOTAL_FORMS".to_string(), management.total_forms.to_string()),
		("form-INITIAL_FORMS".to_string(), management.initial_forms.to_string()),
	];
	for index in 0..formset.len() {
		pairs.push((prefix.field_name(index, "jobId"), format!("job-{index}")));
	}

	let bound = BoundFormset::from_pairs(&prefix, pairs).unwrap();
	assert_eq!(bound.total_form_count(), 3);
	assert_eq!(
		bound.form(2).and_then(|f| f.get("jobId")).map(String::as_str),
		Some("job-2")
	);
}

proptest! {
	#[test]
	fn prop_trusted_counter_arithmetic(n in 0usize..40) {
		let mut formset = job_formset(CounterPolicy::Trust);
		formset.set_total_forms_raw("0");

		let mut seen = HashSet::new();
		for _ in 0..n {
			let index = formset.add_form().unwrap();
			prop_assert!(seen.insert(index));
		}

		prop_assert_eq!(formset.len(), n + 1);
		prop_assert_eq!(formset.total_forms_raw(), n.to_string());
	}

	#[test]
	fn prop_reconciled_counter_matches_blocks(counter in "\\PC{0,6}", n in 1usize..20) {
		let mut formset = job_formset(CounterPolicy::Reconcile);
		formset.set_total_forms_raw(counter);

		for _ in 0..n {
			formset.add_form().unwrap();
			prop_assert_eq!(formset.total_forms_raw(), formset.len().to_string());
		}
	}

	#[test]
	fn prop_reindex_changes_only_the_index(index in 0usize..100_000) {
		let prefix = FormPrefix::default();
		let rewritten = prefix.rewrite(JOB_FORM, index).into_owned();

		prop_assert_eq!(prefix.count_markers(&rewritten), 8);
		prop_assert_eq!(prefix.rewrite(&rewritten, 0), JOB_FORM);
	}
}
