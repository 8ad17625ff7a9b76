//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input,
//! lifecycle events, and HTTP responses, translating them into state changes,
//! notifications and actions.
//!
//! # Architecture
//!
//! 1. Events arrive from the runtime (keys, resizes, request outcomes)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `ViewStore` methods
//! 4. Notifications go to the injected [`Notifier`]
//! 5. Actions are collected and returned for execution
//!
//! # Remote operations
//!
//! Every mutation is followed by a full list fetch once it succeeds; the list
//! is never patched locally. Failures are logged with their cause and shown
//! to the user as a fixed message per operation:
//!
//! | Outcome | Notification |
//! |---|---|
//! | list: unrecognized body | error `Unexpected response format!` |
//! | list: request failed | error `Error fetching vehicles!` |
//! | add: empty name | error `Vehicle name is required!` (nothing sent) |
//! | add: success | success `Vehicle added!` |
//! | add: request failed | error `Error adding vehicle!` |
//! | status: success | success `Status updated to {status}!` |
//! | status: request failed | error `Error updating status!` |
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::api::VehicleApi;
//! use vehicle_dashboard::app::{handle_event, Action, AppState, Event};
//! use vehicle_dashboard::notify::ToastQueue;
//! use vehicle_dashboard::ui::Theme;
//!
//! let mut state = AppState::new(VehicleApi::new("http://localhost:5000"), Theme::default());
//! let mut toasts = ToastQueue::new();
//! let (_, actions) = handle_event(&mut state, &Event::Mount, &mut toasts)?;
//! assert!(matches!(actions.as_slice(), [Action::Send(_)]));
//! # Ok::<(), vehicle_dashboard::domain::DashboardError>(())
//! ```

use super::modes::InputMode;
use crate::api::{ApiResponse, RequestContext, VehicleApi};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{DashboardError, DraftPatch, Operation, VehicleStatus};
use crate::notify::Notifier;

pub const MSG_UNEXPECTED_FORMAT: &str = "Unexpected response format!";
pub const MSG_FETCH_FAILED: &str = "Error fetching vehicles!";
pub const MSG_NAME_REQUIRED: &str = "Vehicle name is required!";
pub const MSG_VEHICLE_ADDED: &str = "Vehicle added!";
pub const MSG_ADD_FAILED: &str = "Error adding vehicle!";
pub const MSG_UPDATE_FAILED: &str = "Error updating status!";

/// Success message for a status update.
#[must_use]
pub fn status_updated_message(status: VehicleStatus) -> String {
    format!("Status updated to {status}!")
}

/// Events triggered by user input, lifecycle changes, or request outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Creates a fresh store and fetches the list. Mounting while mounted
    /// first unmounts, discarding the draft and filter.
    Mount,
    /// Drops the store; later responses are ignored.
    Unmount,
    /// Terminal size changed.
    Resize,
    /// Quits the dashboard.
    Quit,

    /// Moves selection down by one row (wraps to top).
    KeyDown,
    /// Moves selection up by one row (wraps to bottom).
    KeyUp,
    /// Status action on the selected vehicle.
    SetStatus(VehicleStatus),
    /// Advances the status filter.
    NextFilter,
    /// Steps the status filter back.
    PrevFilter,

    /// Moves keyboard focus to the "Add New Vehicle" form.
    FocusForm,
    /// Leaves the form, keeping the draft.
    Escape,
    /// Appends a character to the draft name.
    Char(char),
    /// Removes the last character of the draft name.
    Backspace,
    /// Cycles the draft status forward.
    NextDraftStatus,
    /// Cycles the draft status backward.
    PrevDraftStatus,
    /// Submits the draft ("add").
    Submit,

    /// Outcome of a request previously emitted as [`Action::Send`].
    Response {
        context: RequestContext,
        response: ApiResponse,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Remote and validation failures are reported through `notifier` and never
/// returned. An error here means an unexpected internal failure.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(
    state: &mut AppState,
    event: &Event,
    notifier: &mut dyn Notifier,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => {
            state.unmount();
            let request = state.mount();
            Ok((true, vec![Action::Send(request)]))
        }
        Event::Unmount => {
            state.unmount();
            Ok((true, vec![]))
        }
        Event::Resize => Ok((true, vec![])),
        Event::Quit => {
            state.unmount();
            Ok((false, vec![Action::Quit]))
        }
        Event::Response { context, response } => handle_response(state, context, response, notifier),
        _ if !state.is_mounted() => {
            tracing::debug!("ignoring input while unmounted");
            Ok((false, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::SetStatus(status) => {
            let Some(vehicle) = state.selected_vehicle().cloned() else {
                tracing::debug!("no vehicle selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(vehicle_id = %vehicle.id, target_status = %status, "status action");
            let request = state.update_status_request(&vehicle, *status);
            Ok((true, vec![Action::Send(request)]))
        }
        Event::NextFilter | Event::PrevFilter => {
            if let Some(store) = state.store.as_mut() {
                let filter = if *event == Event::NextFilter {
                    store.filter().next()
                } else {
                    store.filter().prev()
                };
                tracing::debug!(filter = filter.label(), "filter changed");
                store.set_filter(filter);
            }
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusForm => {
            state.input_mode = InputMode::Form;
            Ok((true, vec![]))
        }
        Event::Escape => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::Char(_) | Event::Backspace | Event::NextDraftStatus | Event::PrevDraftStatus
            if state.input_mode != InputMode::Form =>
        {
            Ok((false, vec![]))
        }
        Event::Char(c) => {
            if let Some(store) = state.store.as_mut() {
                let mut name = store.draft().name.clone();
                name.push(*c);
                store.update_draft(DraftPatch::name(name));
            }
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if let Some(store) = state.store.as_mut() {
                let mut name = store.draft().name.clone();
                name.pop();
                store.update_draft(DraftPatch::name(name));
            }
            Ok((true, vec![]))
        }
        Event::NextDraftStatus | Event::PrevDraftStatus => {
            if let Some(store) = state.store.as_mut() {
                let current = store.draft().status;
                let status = if *event == Event::NextDraftStatus {
                    current.next_in_form()
                } else {
                    current.prev_in_form()
                };
                store.update_draft(DraftPatch::status(status));
            }
            Ok((true, vec![]))
        }
        Event::Submit => match state.create_request() {
            Ok(request) => {
                tracing::debug!(request_id = request.context.request_id, "submitting new vehicle");
                Ok((true, vec![Action::Send(request)]))
            }
            Err(DashboardError::Validation(reason)) => {
                tracing::debug!(%reason, "draft rejected");
                notifier.notify_error(MSG_NAME_REQUIRED);
                Ok((true, vec![]))
            }
            Err(e) => Err(e),
        },
    }
}

/// Applies the outcome of one request.
fn handle_response(
    state: &mut AppState,
    context: &RequestContext,
    response: &ApiResponse,
    notifier: &mut dyn Notifier,
) -> Result<(bool, Vec<Action>)> {
    if !state.accepts(context) {
        tracing::debug!(
            request_id = context.request_id,
            request_generation = context.generation,
            current_generation = state.generation,
            mounted = state.is_mounted(),
            "dropping stale response"
        );
        return Ok((false, vec![]));
    }
    state.request_resolved();

    match context.operation {
        Operation::List => {
            match VehicleApi::decode_list(response) {
                Ok(vehicles) => {
                    if let Some(store) = state.store.as_mut() {
                        store.set_vehicles(vehicles);
                    }
                    state.clamp_selection();
                }
                Err(DashboardError::UnexpectedFormat(detail)) => {
                    tracing::warn!(request_id = context.request_id, %detail, "unrecognized list response");
                    notifier.notify_error(MSG_UNEXPECTED_FORMAT);
                }
                Err(e) => {
                    tracing::error!(request_id = context.request_id, cause = %e, "error fetching vehicles");
                    notifier.notify_error(MSG_FETCH_FAILED);
                }
            }
            Ok((true, vec![]))
        }
        Operation::Create => match VehicleApi::decode_create(response) {
            Ok(()) => {
                let refetch = state.list_request();
                if let Some(store) = state.store.as_mut() {
                    store.reset_draft();
                }
                notifier.notify_success(MSG_VEHICLE_ADDED);
                Ok((true, vec![Action::Send(refetch)]))
            }
            Err(e) => {
                tracing::error!(request_id = context.request_id, cause = %e, "error adding vehicle");
                notifier.notify_error(MSG_ADD_FAILED);
                Ok((true, vec![]))
            }
        },
        Operation::UpdateStatus => match VehicleApi::decode_update(response) {
            Ok(()) => {
                let refetch = state.list_request();
                let status = context.target_status.unwrap_or_default();
                notifier.notify_success(&status_updated_message(status));
                Ok((true, vec![Action::Send(refetch)]))
            }
            Err(e) => {
                tracing::error!(
                    request_id = context.request_id,
                    vehicle_id = ?context.vehicle_id,
                    cause = %e,
                    "error updating status"
                );
                notifier.notify_error(MSG_UPDATE_FAILED);
                Ok((true, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiRequest, HttpMethod};
    use crate::domain::{StatusFilter, Vehicle, VehicleId};
    use crate::ui::Theme;
    use serde_json::json;

    #[derive(Default)]
    struct Recorded {
        successes: Vec<String>,
        errors: Vec<String>,
    }

    impl Notifier for Recorded {
        fn notify_success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }
        fn notify_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn mounted() -> (AppState, ApiRequest, Recorded) {
        let mut state = AppState::new(VehicleApi::new("http://fleet.test"), Theme::default());
        let mut notes = Recorded::default();
        let (_, actions) = handle_event(&mut state, &Event::Mount, &mut notes).unwrap();
        let [Action::Send(list)] = actions.as_slice() else {
            panic!("expected one list request, got {actions:?}");
        };
        (state, list.clone(), notes)
    }

    fn respond(
        state: &mut AppState,
        request: &ApiRequest,
        response: ApiResponse,
        notes: &mut Recorded,
    ) -> Vec<Action> {
        let event = Event::Response { context: request.context.clone(), response };
        handle_event(state, &event, notes).unwrap().1
    }

    fn fleet() -> serde_json::Value {
        json!([
            {"id": 1, "name": "Van", "status": "Inactive"},
            {"id": 2, "name": "Bus", "status": "Active"},
        ])
    }

    fn names(state: &AppState) -> Vec<String> {
        state.store.as_ref().unwrap().vehicles().iter().map(|v| v.name.clone()).collect()
    }

    #[test]
    fn list_success_replaces_vehicles() {
        let (mut state, list, mut notes) = mounted();
        let actions = respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);
        assert!(actions.is_empty());
        assert_eq!(names(&state), ["Van", "Bus"]);
        assert!(notes.errors.is_empty());
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn unrecognized_list_keeps_prior_list() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);

        let again = state.list_request();
        respond(&mut state, &again, ApiResponse::json(200, &json!({"items": []})), &mut notes);
        assert_eq!(names(&state), ["Van", "Bus"]);
        assert_eq!(notes.errors, [MSG_UNEXPECTED_FORMAT]);
    }

    #[test]
    fn failed_list_notifies_fetch_error() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::TransportFailed("refused".into()), &mut notes);
        assert_eq!(notes.errors, [MSG_FETCH_FAILED]);
        assert!(names(&state).is_empty());
    }

    #[test]
    fn empty_name_sends_nothing() {
        let (mut state, _, mut notes) = mounted();
        let (render, actions) = handle_event(&mut state, &Event::Submit, &mut notes).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(notes.errors, [MSG_NAME_REQUIRED]);
    }

    #[test]
    fn typing_only_edits_draft_in_form_mode() {
        let (mut state, _, mut notes) = mounted();
        handle_event(&mut state, &Event::Char('x'), &mut notes).unwrap();
        assert_eq!(state.store.as_ref().unwrap().draft().name, "");

        handle_event(&mut state, &Event::FocusForm, &mut notes).unwrap();
        for c in "Vann".chars() {
            handle_event(&mut state, &Event::Char(c), &mut notes).unwrap();
        }
        handle_event(&mut state, &Event::Backspace, &mut notes).unwrap();
        handle_event(&mut state, &Event::NextDraftStatus, &mut notes).unwrap();
        handle_event(&mut state, &Event::Escape, &mut notes).unwrap();

        let draft = state.store.as_ref().unwrap().draft();
        assert_eq!(draft.name, "Van");
        assert_eq!(draft.status, VehicleStatus::Active);
        assert_eq!(state.input_mode, InputMode::Browse);
    }

    #[test]
    fn failed_create_keeps_draft() {
        let (mut state, _, mut notes) = mounted();
        state.store.as_mut().unwrap().update_draft(DraftPatch::name("Truck1"));

        let (_, actions) = handle_event(&mut state, &Event::Submit, &mut notes).unwrap();
        let [Action::Send(create)] = actions.as_slice() else { panic!("{actions:?}") };
        let create = create.clone();

        let follow_up = respond(
            &mut state,
            &create,
            ApiResponse::Received { status: 500, body: b"boom".to_vec() },
            &mut notes,
        );
        assert!(follow_up.is_empty());
        assert_eq!(notes.errors, [MSG_ADD_FAILED]);
        assert_eq!(state.store.as_ref().unwrap().draft().name, "Truck1");
    }

    #[test]
    fn status_action_targets_selected_vehicle() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);
        handle_event(&mut state, &Event::KeyDown, &mut notes).unwrap();

        let (_, actions) =
            handle_event(&mut state, &Event::SetStatus(VehicleStatus::Maintenance), &mut notes).unwrap();
        let [Action::Send(update)] = actions.as_slice() else { panic!("{actions:?}") };
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url, "http://fleet.test/api/vehicles/2");
        assert_eq!(update.body, Some(json!({"status": "Maintenance"})));
        let update = update.clone();

        let follow_up = respond(&mut state, &update, ApiResponse::json(200, &json!({})), &mut notes);
        assert!(matches!(
            follow_up.as_slice(),
            [Action::Send(r)] if r.context.operation == Operation::List
        ));
        assert_eq!(notes.successes, ["Status updated to Maintenance!"]);
    }

    #[test]
    fn overlapping_lists_apply_in_resolution_order() {
        let (mut state, first, mut notes) = mounted();
        let second = state.list_request();
        let third = state.list_request();
        assert_eq!(state.in_flight, 3);

        let only = |name: &str| json!([{"id": name, "name": name, "status": "Active"}]);
        respond(&mut state, &third, ApiResponse::json(200, &only("Third")), &mut notes);
        respond(&mut state, &second, ApiResponse::json(200, &only("Second")), &mut notes);
        assert_eq!(names(&state), ["Second"]);
        respond(&mut state, &first, ApiResponse::json(200, &only("First")), &mut notes);

        assert_eq!(names(&state), ["First"]);
        assert_eq!(state.in_flight, 0);
        assert!(notes.errors.is_empty());
    }

    #[test]
    fn back_to_back_status_actions_each_send_and_refetch() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);

        let mut updates = Vec::new();
        for status in [VehicleStatus::Active, VehicleStatus::Maintenance] {
            let (_, actions) = handle_event(&mut state, &Event::SetStatus(status), &mut notes).unwrap();
            let [Action::Send(update)] = actions.as_slice() else { panic!("{actions:?}") };
            updates.push(update.clone());
        }
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.method == HttpMethod::Put));
        assert_ne!(updates[0].context.request_id, updates[1].context.request_id);
        assert_eq!(state.in_flight, 2);

        let mut refetches = Vec::new();
        for update in &updates {
            let follow_up = respond(&mut state, update, ApiResponse::json(200, &json!({})), &mut notes);
            let [Action::Send(refetch)] = follow_up.as_slice() else { panic!("{follow_up:?}") };
            assert_eq!(refetch.context.operation, Operation::List);
            refetches.push(refetch.clone());
        }
        assert_ne!(refetches[0].context.request_id, refetches[1].context.request_id);
        assert_eq!(state.in_flight, 2);
        assert_eq!(
            notes.successes,
            ["Status updated to Active!", "Status updated to Maintenance!"]
        );

        for refetch in &refetches {
            respond(&mut state, refetch, ApiResponse::json(200, &fleet()), &mut notes);
        }
        assert_eq!(state.in_flight, 0);
        assert_eq!(names(&state), ["Van", "Bus"]);
    }

    #[test]
    fn failed_update_leaves_list_untouched() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);
        let before: Vec<Vehicle> = state.store.as_ref().unwrap().vehicles().to_vec();

        let (_, actions) =
            handle_event(&mut state, &Event::SetStatus(VehicleStatus::Active), &mut notes).unwrap();
        let [Action::Send(update)] = actions.as_slice() else { panic!("{actions:?}") };
        let update = update.clone();
        let follow_up = respond(
            &mut state,
            &update,
            ApiResponse::Received { status: 404, body: b"not found".to_vec() },
            &mut notes,
        );

        assert!(follow_up.is_empty());
        assert_eq!(state.store.as_ref().unwrap().vehicles(), before.as_slice());
        assert_eq!(notes.errors, [MSG_UPDATE_FAILED]);
    }

    #[test]
    fn status_action_without_selection_is_ignored() {
        let (mut state, _, mut notes) = mounted();
        let (render, actions) =
            handle_event(&mut state, &Event::SetStatus(VehicleStatus::Active), &mut notes).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn responses_after_unmount_are_dropped() {
        let (mut state, list, mut notes) = mounted();
        handle_event(&mut state, &Event::Unmount, &mut notes).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::Response { context: list.context.clone(), response: ApiResponse::json(200, &fleet()) },
            &mut notes,
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.store.is_none());
    }

    #[test]
    fn responses_from_previous_mount_are_dropped() {
        let (mut state, stale, mut notes) = mounted();
        handle_event(&mut state, &Event::Mount, &mut notes).unwrap();

        respond(&mut state, &stale, ApiResponse::TransportFailed("late".into()), &mut notes);
        assert!(notes.errors.is_empty());
        assert!(names(&state).is_empty());
    }

    #[test]
    fn filter_changes_clamp_selection() {
        let (mut state, list, mut notes) = mounted();
        respond(&mut state, &list, ApiResponse::json(200, &fleet()), &mut notes);
        handle_event(&mut state, &Event::KeyDown, &mut notes).unwrap();
        assert_eq!(state.selected_index, 1);

        handle_event(&mut state, &Event::NextFilter, &mut notes).unwrap();
        assert_eq!(state.store.as_ref().unwrap().filter(), StatusFilter::Only(VehicleStatus::Active));
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_vehicle().map(|v| v.id.clone()), Some(VehicleId::new("2")));
    }

    #[test]
    fn input_is_ignored_while_unmounted() {
        let mut state = AppState::new(VehicleApi::new("http://fleet.test"), Theme::default());
        let mut notes = Recorded::default();
        let (render, actions) = handle_event(&mut state, &Event::Submit, &mut notes).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(notes.errors.is_empty());
    }

    #[test]
    fn quit_unmounts() {
        let (mut state, _, mut notes) = mounted();
        let (_, actions) = handle_event(&mut state, &Event::Quit, &mut notes).unwrap();
        assert_eq!(actions, vec![Action::Quit]);
        assert!(!state.is_mounted());
    }
}
