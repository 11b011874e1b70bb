//! View rendering for the onboarding form.
//!
//! Three tabs: basic info, KYC (one card per registry section, with upload
//! slots, OCR switch, fields and the verify button) and documents. Every input
//! is driven by the field registry, so the lead and dealer forms share it.

use crm_common::model::document::{DocumentRecord, DocumentType, OTHER_DOCUMENT};
use crm_common::model::entity::EntityKind;
use crm_common::model::field::{FieldKind, FieldSpec};
use crm_common::model::file::FileSlot;
use crm_common::model::kyc::Provenance;
use crm_common::onboarding::registry::{self, KycSection};
use crm_common::onboarding::state::VerificationStatus;
use crm_common::onboarding::{Action, Bucket, Tab};
use yew::html::Scope;
use yew::prelude::*;

use crate::helpers::{event_checked, event_file, event_value};

use super::helpers::{basic_slots, format_size};
use super::messages::Msg;
use super::state::OnboardingComponent;

type Link = Scope<OnboardingComponent>;

pub fn view(component: &OnboardingComponent, ctx: &Context<OnboardingComponent>) -> Html {
    let link = ctx.link();
    let form = &component.form;
    let title = match form.entity() {
        EntityKind::Lead => "Create Lead",
        EntityKind::Dealer => "Onboard Dealer",
    };

    html! {
        <div class="onboarding">
            <h1>{title}</h1>
            { build_tab_bar(component, link) }
            <div class="tab-body">
                {
                    match form.active_tab() {
                        Tab::Basic => build_basic_tab(component, link),
                        Tab::Kyc => build_kyc_tab(component, link),
                        Tab::Documents => build_documents_tab(component, link),
                    }
                }
            </div>
            <div class="form-footer">
                <button
                    class="primary"
                    disabled={form.is_submitting()}
                    onclick={link.callback(|_| Msg::Apply(Action::Submit))}
                >
                    { if form.is_submitting() { "Submitting..." } else { "Submit" } }
                </button>
            </div>
        </div>
    }
}

/// Tab buttons. The active tab carries a red dot while there are unsaved changes.
fn build_tab_bar(component: &OnboardingComponent, link: &Link) -> Html {
    let active = component.form.active_tab();
    let dirty = component.is_dirty();

    html! {
        <div class="tab-bar">
            {
                for Tab::ALL.into_iter().map(|tab| html! {
                    <button
                        class={classes!("tab-btn", (tab == active).then_some("active"))}
                        onclick={link.callback(move |_| Msg::Apply(Action::SelectTab(tab)))}
                    >
                        {tab.label()}
                        {
                            if dirty && tab == active {
                                html! { <span class="dirty-dot" title="Unsaved changes" /> }
                            } else {
                                html! {}
                            }
                        }
                    </button>
                })
            }
        </div>
    }
}

fn build_basic_tab(component: &OnboardingComponent, link: &Link) -> Html {
    let form = &component.form;
    html! {
        <div class="grid">
            {
                for registry::fields(form.entity()).iter().map(|spec| {
                    field_input(spec, form.basic().get(spec.name), form.error(spec.name), Bucket::Basic, None, link)
                })
            }
            { for basic_slots(form).into_iter().map(|slot| slot_input(component, slot, link)) }
        </div>
    }
}

fn build_kyc_tab(component: &OnboardingComponent, link: &Link) -> Html {
    html! {
        <div class="kyc">
            {
                for registry::kyc_sections(component.form.entity())
                    .iter()
                    .map(|section| kyc_card(component, section, link))
            }
        </div>
    }
}

fn kyc_card(component: &OnboardingComponent, section: &'static KycSection, link: &Link) -> Html {
    let form = &component.form;

    let ocr_switch = match section.ocr {
        Some(kind) => {
            let enabled = form.ocr_enabled(kind);
            html! {
                <label class="switch">
                    <input
                        type="checkbox"
                        checked={enabled}
                        onchange={link.callback(move |e: Event| Msg::Apply(Action::SetOcrEnabled {
                            kind,
                            enabled: event_checked(&e),
                        }))}
                    />
                    {" Auto-fill from document"}
                    {
                        if form.is_extracting(kind) {
                            html! { <span class="badge info">{format!("Extracting {kind}...")}</span> }
                        } else {
                            html! {}
                        }
                    }
                </label>
            }
        }
        None => html! {},
    };

    let verify = match section.verification {
        Some(kind) => {
            let status = form.verification(kind);
            let pending = status == Some(&VerificationStatus::Pending);
            let badge = match status {
                Some(VerificationStatus::Pending) => html! { <span class="badge info">{"Verifying..."}</span> },
                Some(VerificationStatus::Verified(message)) => html! { <span class="badge success">{message.clone()}</span> },
                Some(VerificationStatus::Failed(message)) => html! { <span class="badge error">{message.clone()}</span> },
                None => html! {},
            };
            html! {
                <div class="verify-row">
                    <button
                        disabled={pending}
                        onclick={link.callback(move |_| Msg::Apply(Action::Verify(kind)))}
                    >
                        {format!("Verify {kind}")}
                    </button>
                    {badge}
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <section class="card">
            <div class="card-header">
                <h3>{section.title}</h3>
                {ocr_switch}
            </div>
            <div class="grid">
                { for section.slots.iter().map(|slot| slot_input(component, *slot, link)) }
                {
                    for section.fields.iter().map(|spec| {
                        field_input(
                            spec,
                            form.kyc().get(spec.name),
                            None,
                            Bucket::Kyc,
                            form.kyc().provenance(spec.name),
                            link,
                        )
                    })
                }
            </div>
            {verify}
        </section>
    }
}

/// Renders one registry field as an input, select or textarea.
///
/// # Arguments
/// * `spec` - The field's registry entry.
/// * `value` - Current value from the basic or KYC bucket.
/// * `error` - Inline validation message from the last blocked submit.
/// * `bucket` - Where edits are written back.
/// * `provenance` - For KYC fields, whether the value came from OCR or a lookup.
/// * `link` - Component scope for the callbacks.
fn field_input(
    spec: &'static FieldSpec,
    value: &str,
    error: Option<&str>,
    bucket: Bucket,
    provenance: Option<Provenance>,
    link: &Link,
) -> Html {
    let name = spec.name;
    let set = move |value: String| {
        Msg::Apply(Action::SetField {
            bucket,
            name: name.to_string(),
            value,
        })
    };
    let oninput = link.callback(move |e: InputEvent| set(event_value(&e)));
    let onchange = link.callback(move |e: Event| set(event_value(&e)));

    let control = match spec.kind {
        FieldKind::Textarea => html! {
            <textarea name={name} value={value.to_string()} {oninput} />
        },
        FieldKind::Select => html! {
            <select name={name} {onchange}>
                <option value="" selected={value.is_empty()}>{"Select"}</option>
                {
                    for spec.choices.iter().map(|choice| html! {
                        <option value={choice.value} selected={choice.value == value}>{choice.label}</option>
                    })
                }
            </select>
        },
        kind => html! {
            <input
                type={kind.input_type()}
                name={name}
                required={spec.required}
                value={value.to_string()}
                {oninput}
            />
        },
    };

    let hint = match provenance {
        Some(Provenance::Extracted(kind)) => html! { <span class="hint">{format!("from {kind} OCR")}</span> },
        Some(Provenance::Verified(kind)) => html! { <span class="hint">{format!("{kind} verified")}</span> },
        _ => html! {},
    };

    html! {
        <label class={classes!("field", error.is_some().then_some("invalid"))}>
            <span>
                {spec.label}
                { if spec.required { html! { <span class="required">{" *"}</span> } } else { html! {} } }
            </span>
            {control}
            {hint}
            {
                match error {
                    Some(error) => html! { <span class="error">{error.to_string()}</span> },
                    None => html! {},
                }
            }
        </label>
    }
}

/// File picker for a single-file slot, with the current file and a Clear button.
/// The picked file is read in `update.rs` before it reaches the session.
fn slot_input(component: &OnboardingComponent, slot: FileSlot, link: &Link) -> Html {
    let current = component.form.file(slot);
    let onchange = link.batch_callback(move |e: Event| {
        event_file(&e).map(|file| Msg::PickSlotFile(slot, file))
    });

    html! {
        <div class="field slot">
            <span>{slot.label()}</span>
            <input type="file" accept="image/*,application/pdf" {onchange} />
            {
                match current {
                    Some(file) => html! {
                        <span class="file-name">
                            {format!("{} ({})", file.name(), format_size(file.len()))}
                            <button
                                class="link"
                                onclick={link.callback(move |_| Msg::Apply(Action::SetFile { slot, file: None }))}
                            >
                                {"Clear"}
                            </button>
                        </span>
                    },
                    None => html! { <span class="muted">{"No file selected"}</span> },
                }
            }
        </div>
    }
}

fn build_documents_tab(component: &OnboardingComponent, link: &Link) -> Html {
    let options = registry::document_options(component.form.entity());
    let can_add = component.selected_document_type().is_some() && component.document_file.is_some();

    html! {
        <div class="documents">
            <div class="card document-picker">
                <select onchange={link.callback(|e: Event| Msg::SelectDocumentType(event_value(&e)))}>
                    <option value="" selected={component.document_type.is_empty()}>{"Select document type"}</option>
                    {
                        for options.iter().map(|choice| html! {
                            <option value={choice.value} selected={component.document_type == choice.value}>
                                {choice.label}
                            </option>
                        })
                    }
                </select>
                {
                    if component.document_type == OTHER_DOCUMENT {
                        html! {
                            <input
                                placeholder="Document name"
                                value={component.custom_document_name.clone()}
                                oninput={link.callback(|e: InputEvent| Msg::SetCustomDocumentName(event_value(&e)))}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
                <input
                    type="file"
                    onchange={link.batch_callback(|e: Event| event_file(&e).map(Msg::PickDocumentFile))}
                />
                {
                    match &component.document_file {
                        Some(file) => html! { <span class="file-name">{file.name().to_string()}</span> },
                        None => html! {},
                    }
                }
                <button disabled={!can_add} onclick={link.callback(|_| Msg::AddDocument)}>
                    {"Add Document"}
                </button>
            </div>
            {
                if component.form.documents().is_empty() {
                    html! { <p class="muted">{"No documents added yet."}</p> }
                } else {
                    html! {
                        <table class="document-list">
                            <thead>
                                <tr><th>{"Type"}</th><th>{"File"}</th><th>{"Size"}</th><th>{"Added"}</th><th /></tr>
                            </thead>
                            <tbody>
                                { for component.form.documents().records().iter().map(|record| document_row(component, record, link)) }
                            </tbody>
                        </table>
                    }
                }
            }
        </div>
    }
}

fn document_row(component: &OnboardingComponent, record: &DocumentRecord, link: &Link) -> Html {
    let id = record.id;
    let options = registry::document_options(component.form.entity());
    let in_catalog = options.iter().any(|choice| choice.value == record.doc_type.value);
    let onchange = link.batch_callback(move |e: Event| {
        let value = event_value(&e);
        options
            .iter()
            .find(|choice| choice.value == value && choice.value != OTHER_DOCUMENT)
            .map(|choice| {
                Msg::Apply(Action::RetypeDocument {
                    id,
                    doc_type: DocumentType::new(choice.value, choice.label),
                })
            })
    });

    html! {
        <tr key={id.to_string()}>
            <td>
                <select {onchange}>
                    {
                        if in_catalog {
                            html! {}
                        } else {
                            html! { <option value={record.doc_type.value.clone()} selected=true>{record.doc_type.label.clone()}</option> }
                        }
                    }
                    {
                        for options.iter().filter(|choice| choice.value != OTHER_DOCUMENT).map(|choice| html! {
                            <option value={choice.value} selected={choice.value == record.doc_type.value}>{choice.label}</option>
                        })
                    }
                </select>
            </td>
            <td>{record.file.name().to_string()}</td>
            <td>{format_size(record.file.len())}</td>
            <td>{record.uploaded_at.format("%d %b %Y %H:%M").to_string()}</td>
            <td>
                <button class="link danger" onclick={link.callback(move |_| Msg::Apply(Action::RemoveDocument(id)))}>
                    {"Remove"}
                </button>
            </td>
        </tr>
    }
}
