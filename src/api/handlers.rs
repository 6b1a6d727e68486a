//! HTTP request handlers for the HR API.
//!
//! Handlers read the caller and body, run one service call against the
//! shared store and wrap the outcome in the response envelope.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    Attendance, AttendanceRequest, Employee, EmployeeCheckin, LeaveApplication,
    WorkFromHomeRequest,
};
use crate::services::checkins::CheckinQuery;
use crate::services::employees::DeletedEmployee;
use crate::services::holidays::{HolidayListView, HolidayQuery, UpcomingBirthday};
use crate::services::leave::{LeaveDashboard, SubmittedLeave};
use crate::services::{
    ListSummary, attendance, attendance_requests, checkins, employees, holidays, leave,
    work_from_home,
};

use super::request::{DashboardQuery, EmployeeListQuery, body_fields, caller};
use super::response::{ApiResult, ApiSuccess};
use super::state::AppState;

type JsonBody = Result<Json<Value>, JsonRejection>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/:name",
            put(update_employee).delete(delete_employee),
        )
        .route("/api/checkins", get(list_checkins).post(create_checkin))
        .route("/api/attendance", get(list_attendance))
        .route(
            "/api/leave-applications",
            get(list_leave_applications).post(create_leave_application),
        )
        .route(
            "/api/leave-applications/:name",
            put(update_leave_application).delete(delete_leave_application),
        )
        .route(
            "/api/leave-applications/:name/submit",
            post(submit_leave_application),
        )
        .route("/api/leave-dashboard", get(leave_dashboard))
        .route(
            "/api/work-from-home",
            get(list_work_from_home).post(create_work_from_home),
        )
        .route(
            "/api/work-from-home/:name",
            put(update_work_from_home).delete(delete_work_from_home),
        )
        .route(
            "/api/attendance-requests",
            get(list_attendance_requests).post(create_attendance_request),
        )
        .route(
            "/api/attendance-requests/:name",
            put(update_attendance_request).delete(delete_attendance_request),
        )
        .route("/api/holidays", get(holiday_list))
        .route("/api/birthdays", get(birthdays))
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

/// Logs every request with a correlation id, its outcome and duration.
async fn trace_request(request: Request<Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    info!(correlation_id = %correlation_id, method = %method, path = %path, "Processing request");

    let start_time = Instant::now();
    let response = next.run(request).await;
    let duration = start_time.elapsed();
    let status = response.status();

    if status.is_success() {
        info!(
            correlation_id = %correlation_id,
            status = status.as_u16(),
            duration_us = duration.as_micros(),
            "Request completed successfully"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_us = duration.as_micros(),
            "Request failed"
        );
    }
    response
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult<Vec<Employee>> {
    let identity = caller(&headers)?;
    let items = state.with_store(|store| employees::list_employees(store, &identity, query.only_self))?;
    let summary = ListSummary::total(items.len());
    Ok(ApiSuccess {
        summary: Some(summary),
        ..ApiSuccess::new("Employees fetched", items)
    })
}

async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: JsonBody,
) -> ApiResult<Employee> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let policy = state.config().leave_policy();
    let employee = state.with_store(|store| {
        employees::create_employee(store, &identity, policy, &fields, today())
    })?;
    Ok(ApiSuccess::new("Employee created successfully", employee))
}

async fn update_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    payload: JsonBody,
) -> ApiResult<Employee> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let employee =
        state.with_store(|store| employees::update_employee(store, &identity, &name, &fields))?;
    Ok(ApiSuccess::new("Employee updated successfully", employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<DeletedEmployee> {
    let identity = caller(&headers)?;
    let deleted = state.with_store(|store| employees::delete_employee(store, &identity, &name))?;
    Ok(ApiSuccess::new("Employee deleted successfully", deleted))
}

async fn list_checkins(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CheckinQuery>,
) -> ApiResult<Vec<EmployeeCheckin>> {
    let identity = caller(&headers)?;
    let items = state.with_store(|store| checkins::list_checkins(store, &identity, &query))?;
    Ok(ApiSuccess::new("Check-ins fetched", items))
}

async fn create_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: JsonBody,
) -> ApiResult<EmployeeCheckin> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let hr = state.config().hr();
    let checkin = state.with_store(|store| checkins::create_checkin(store, hr, &identity, &fields))?;
    Ok(ApiSuccess::new("Check-in recorded", checkin))
}

async fn list_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Attendance>> {
    let identity = caller(&headers)?;
    let items = state.with_store(|store| attendance::list_attendance(store, &identity))?;
    Ok(ApiSuccess::new("Attendance fetched", items))
}

async fn list_leave_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<LeaveApplication>> {
    let identity = caller(&headers)?;
    let listing = state.with_store(|store| leave::list_leave_applications(store, &identity))?;
    Ok(ApiSuccess::listing("Leave applications fetched", listing))
}

async fn create_leave_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: JsonBody,
) -> ApiResult<LeaveApplication> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let application = state.with_store(|store| {
        leave::create_leave_application(store, &identity, &fields, today())
    })?;
    Ok(ApiSuccess::new("Leave application created", application))
}

async fn update_leave_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    payload: JsonBody,
) -> ApiResult<LeaveApplication> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let application = state.with_store(|store| {
        leave::update_leave_application(store, &identity, &name, &fields)
    })?;
    Ok(ApiSuccess::new("Leave application updated", application))
}

async fn delete_leave_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let identity = caller(&headers)?;
    state.with_store(|store| leave::delete_leave_application(store, &identity, &name))?;
    Ok(ApiSuccess::new("Leave application deleted", name))
}

async fn submit_leave_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<SubmittedLeave> {
    let identity = caller(&headers)?;
    let submitted =
        state.with_store(|store| leave::submit_leave_application(store, &identity, &name))?;
    Ok(ApiSuccess::new("Leave application submitted", submitted))
}

async fn leave_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<LeaveDashboard> {
    let identity = caller(&headers)?;
    let date = query.date.unwrap_or_else(today);
    let dashboard = state.with_store(|store| leave::leave_dashboard(store, &identity, date))?;
    Ok(ApiSuccess::new("Leave dashboard data fetched", dashboard))
}

async fn list_work_from_home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<WorkFromHomeRequest>> {
    let identity = caller(&headers)?;
    let listing = state.with_store(|store| work_from_home::list_work_from_home(store, &identity))?;
    Ok(ApiSuccess::listing("Work from home requests fetched", listing))
}

async fn create_work_from_home(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: JsonBody,
) -> ApiResult<WorkFromHomeRequest> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let config = &state.config().hr().work_from_home;
    let request = state.with_store(|store| {
        work_from_home::create_work_from_home(store, config, &identity, &fields, now())
    })?;
    Ok(ApiSuccess::new("Work from home request created", request))
}

async fn update_work_from_home(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    payload: JsonBody,
) -> ApiResult<WorkFromHomeRequest> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let config = &state.config().hr().work_from_home;
    let request = state.with_store(|store| {
        work_from_home::update_work_from_home(store, config, &identity, &name, &fields, now())
    })?;
    Ok(ApiSuccess::new("Work from home request updated", request))
}

async fn delete_work_from_home(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let identity = caller(&headers)?;
    state.with_store(|store| work_from_home::delete_work_from_home(store, &identity, &name))?;
    Ok(ApiSuccess::new("Work from home request deleted", name))
}

async fn list_attendance_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<AttendanceRequest>> {
    let identity = caller(&headers)?;
    let listing = state.with_store(|store| {
        attendance_requests::list_attendance_requests(store, &identity)
    })?;
    Ok(ApiSuccess::listing("Attendance requests fetched", listing))
}

async fn create_attendance_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: JsonBody,
) -> ApiResult<AttendanceRequest> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let request = state.with_store(|store| {
        attendance_requests::create_attendance_request(store, &identity, &fields)
    })?;
    Ok(ApiSuccess::new("Attendance request created", request))
}

async fn update_attendance_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    payload: JsonBody,
) -> ApiResult<AttendanceRequest> {
    let identity = caller(&headers)?;
    let fields = body_fields(payload)?;
    let request = state.with_store(|store| {
        attendance_requests::update_attendance_request(store, &identity, &name, &fields)
    })?;
    Ok(ApiSuccess::new("Attendance request updated", request))
}

async fn delete_attendance_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let identity = caller(&headers)?;
    state.with_store(|store| {
        attendance_requests::delete_attendance_request(store, &identity, &name)
    })?;
    Ok(ApiSuccess::new("Attendance request deleted", name))
}

async fn holiday_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HolidayQuery>,
) -> ApiResult<HolidayListView> {
    let identity = caller(&headers)?;
    let view = state.with_store(|store| holidays::holiday_list(store, &identity, &query))?;
    Ok(ApiSuccess::new("Holiday list fetched", view))
}

async fn birthdays(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<UpcomingBirthday>> {
    let identity = caller(&headers)?;
    let upcoming = state.with_store(|store| holidays::birthdays(store, &identity, today()))?;
    Ok(ApiSuccess::new("Upcoming birthdays fetched", upcoming))
}
