//! Properties of the import wizard dialog.

use common::jobs::ImportJob;
use yew::prelude::*;

/// The hosting page mounts the wizard only while its dialog is open, so
/// closing the dialog drops every bit of wizard state; reopening always
/// starts from a fresh Upload step.
#[derive(Properties, PartialEq, Clone)]
pub struct ImportWizardProps {
    /// Provider whose licenses are being imported.
    pub provider_id: String,
    /// Display name for the dialog header.
    pub provider_name: String,
    /// Fired once when an import job reaches `completed`, with the terminal
    /// counts. The host typically refreshes its tables.
    #[prop_or_default]
    pub on_success: Callback<ImportJob>,
    /// Fired with a human-readable message for every failure, in parallel
    /// with the wizard's own inline display, so the host page's notification
    /// system stays consistent with it.
    #[prop_or_default]
    pub on_error: Callback<String>,
    /// Requests the host to close the dialog.
    pub on_close: Callback<()>,
}
