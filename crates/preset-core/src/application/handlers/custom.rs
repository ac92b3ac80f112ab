//! Run a user-declared function.

use tracing::instrument;

use crate::application::ApplicationError;
use crate::application::handlers::HandlerContext;
use crate::domain::CustomAction;
use crate::error::PresetResult;

/// Errors from the function always stop execution.
#[instrument(skip_all, fields(name = %action.name))]
pub fn handle(action: &CustomAction, cx: &HandlerContext<'_>) -> PresetResult<()> {
    action
        .run(cx.preset, cx.options)
        .map_err(|e| {
            ApplicationError::CustomActionFailed {
                name: action.name.clone(),
                reason: e.to_string(),
            }
            .into()
        })
}
