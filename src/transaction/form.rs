//! The entry form markup and the application of posted form fields.

use std::collections::HashMap;

use maud::{Markup, html};

use crate::{
    Error,
    date_picker::{CalendarMonth, date_picker},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
};

use super::{
    categories::profile,
    draft::FieldErrors,
    models::{PaymentMethod, TransactionType},
    staging::StagingList,
    workflow::{EntryWorkflow, Overlay, WorkflowState},
};

/// The order posted fields are applied to the draft in.
///
/// The type goes first because changing it clears the category; the category
/// goes before the description so that a posted category wins over the
/// description auto-match.
const FIELD_ORDER: [&str; 6] = [
    "type",
    "category",
    "description",
    "amount",
    "date",
    "payment_method",
];

/// Apply the recognised fields of a posted form to the workflow's draft.
///
/// Unrecognised keys are ignored so that buttons and HTMX bookkeeping fields
/// can ride along with the form.
///
/// # Errors
/// Returns [Error::WorkflowClosed] if no session is open, or
/// [Error::InvalidDate] for an unparseable date value.
pub(crate) fn apply_posted_fields(
    workflow: &mut EntryWorkflow,
    form: &HashMap<String, String>,
) -> Result<(), Error> {
    for name in FIELD_ORDER {
        if let Some(value) = form.get(name) {
            workflow.update_field(name, value)?;
        }
    }

    Ok(())
}

/// Render the entry form region.
///
/// The region replaces itself on every workflow action (HTMX `outerHTML`
/// swaps on `#entry-form`), so it always reflects the full workflow state:
/// draft values, validation errors, the staged batch, and any open picker.
pub(crate) fn entry_form(workflow: &EntryWorkflow, errors: &FieldErrors) -> Markup {
    let draft = workflow.draft();
    let vocabulary = profile(draft.kind).categories;
    let category_is_custom =
        !draft.category.is_empty() && !vocabulary.contains(&draft.category.as_str());

    let (submit_url, submit_label, is_edit) = match workflow.state() {
        WorkflowState::OpenEdit { id } => (
            endpoints::format_endpoint(endpoints::WORKFLOW_TRANSACTION, id),
            "Save changes",
            true,
        ),
        _ => (
            endpoints::WORKFLOW_STAGED.to_owned(),
            "Add to batch",
            false,
        ),
    };

    html! {
        form
            id="entry-form"
            class="flex flex-col gap-4 w-full max-w-md"
            hx-post=[(!is_edit).then_some(submit_url.as_str())]
            hx-put=[is_edit.then_some(submit_url.as_str())]
            hx-target="#entry-form"
            hx-swap="outerHTML"
        {
            @if let Some(error) = workflow.error() {
                div
                    class="p-4 text-sm rounded-lg text-red-800 bg-red-50 \
                        dark:bg-gray-800 dark:text-red-400"
                    role="alert"
                {
                    (error)
                }
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Transaction type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for kind in TransactionType::ALL {
                        div class="flex items-center gap-3"
                        {
                            input
                                name="type"
                                id=(format!("transaction-type-{kind}"))
                                type="radio"
                                value=(kind.as_str())
                                checked[draft.kind == kind]
                                hx-post=(endpoints::WORKFLOW_FIELD)
                                hx-trigger="change"
                                // Only the changed field travels; the rest of
                                // the form is already in sync server-side.
                                hx-params="type"
                                class=(FORM_RADIO_INPUT_STYLE);

                            label
                                for=(format!("transaction-type-{kind}"))
                                class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (kind.label())
                            }
                        }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-post=(endpoints::WORKFLOW_FIELD)
                    hx-trigger="change"
                    hx-params="category"
                {
                    option value="" selected[draft.category.is_empty()] { "Select a category" }

                    @for category in vocabulary {
                        option value=(category) selected[draft.category == *category] {
                            (category)
                        }
                    }

                    @if category_is_custom {
                        option value=(draft.category) selected { (draft.category) }
                    }
                }

                @if let Some(message) = errors.category {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="0.00"
                    value=(draft.amount)
                    autocomplete="off"
                    hx-post=(endpoints::WORKFLOW_FIELD)
                    hx-trigger="change"
                    hx-params="amount"
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(message) = errors.amount {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="What was this for?"
                    maxlength="100"
                    value=(draft.description)
                    hx-post=(endpoints::WORKFLOW_FIELD)
                    hx-trigger="keyup changed delay:300ms"
                    hx-params="description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                div class="flex flex-row gap-2"
                {
                    input
                        name="date"
                        id="date"
                        type="text"
                        readonly
                        value=(draft.date)
                        class=(FORM_TEXT_INPUT_STYLE);

                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        hx-post=(endpoints::CALENDAR_OPEN)
                    {
                        "Pick"
                    }
                }

                @if workflow.overlay() == Some(Overlay::Calendar) {
                    (date_picker(&CalendarMonth::containing(draft.date), draft.date))
                }
            }

            div
            {
                label for="payment_method" class=(FORM_LABEL_STYLE) { "Payment method" }

                select
                    name="payment_method"
                    id="payment_method"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-post=(endpoints::WORKFLOW_FIELD)
                    hx-trigger="change"
                    hx-params="payment_method"
                {
                    @for method in PaymentMethod::ALL {
                        option
                            value=(method.as_str())
                            selected[draft.payment_method == method]
                        {
                            (method.label())
                        }
                    }
                }
            }

            @if !is_edit {
                (staged_list(workflow.staged()))
            }

            div class="flex flex-col gap-2"
            {
                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                    disabled[workflow.is_submitting()]
                {
                    (submit_label)
                }

                @if !is_edit {
                    button
                        type="button"
                        id="save-all"
                        class=(BUTTON_PRIMARY_STYLE)
                        disabled[workflow.staged().is_empty() || workflow.is_submitting()]
                        hx-post=(endpoints::WORKFLOW_SAVE_ALL)
                    {
                        "Save all (" (workflow.staged().len()) ")"
                    }
                }

                button
                    type="button"
                    class=(BUTTON_SECONDARY_STYLE)
                    hx-post=(endpoints::WORKFLOW_CANCEL)
                {
                    "Cancel"
                }
            }
        }
    }
}

fn staged_list(staged: &StagingList) -> Markup {
    html! {
        div id="staged-list" class="flex flex-col gap-2"
        {
            h2 class="text-sm font-medium text-gray-900 dark:text-white"
            {
                "Batch (" (staged.len()) ")"
            }

            @if staged.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Nothing staged yet. Validated entries collect here until you save them all at once."
                }
            }

            @for entry in staged.entries() {
                div
                    class="flex items-center justify-between p-2 rounded border \
                        border-gray-200 dark:border-gray-600 text-sm"
                {
                    span
                    {
                        span class="font-medium" { (entry.draft.category) }
                        " \u{00b7} " (entry.draft.amount)
                        " on " (entry.draft.date)
                    }

                    button
                        type="button"
                        class="text-red-600 dark:text-red-400 underline"
                        hx-delete=(endpoints::format_endpoint(
                            endpoints::WORKFLOW_STAGED_ENTRY,
                            entry.id as i64,
                        ))
                    {
                        "Remove"
                    }
                }
            }
        }
    }
}
