//! Subcommand execution
//!
//! Every command returns a JSON value that `main` prints to stdout.

use std::time::Duration;

use admin_api::{
    AdminApi, COMPLAINT_PAGE_SIZE, CUSTOMER_PAGE_SIZE, FAQ_PAGE_SIZE, NewFaq,
    PERMANENT_SUSPENSION_DAYS, PageRequest, TICKET_PAGE_SIZE, WORKER_PAGE_SIZE, WorkerAction,
    WorkerQuery,
};
use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use tracing::info;

use crate::cli::{
    BasePriceCommand, Command, ComplaintsCommand, CustomersCommand, FaqsCommand, Paging,
    TicketsCommand, WorkersCommand,
};

impl Paging {
    fn request(self, default_size: u32) -> PageRequest {
        PageRequest::new(self.page, self.page_size.unwrap_or(default_size))
    }
}

/// Run one console command against the backend.
pub async fn run(api: &AdminApi, login_timeout: Duration, command: Command) -> Result<Value> {
    match command {
        Command::Login {
            name,
            phone,
            remember,
        } => login(api, login_timeout, &name, &phone, remember).await,
        Command::Logout => {
            api.gateway().logout().await.context("failed to clear session")?;
            Ok(json!({ "loggedOut": true }))
        }
        Command::Whoami => whoami(api).await,
        Command::Workers(command) => workers(api, command).await,
        Command::Customers(command) => customers(api, command).await,
        Command::Complaints(command) => complaints(api, command).await,
        Command::Faqs(command) => faqs(api, command).await,
        Command::Tickets(TicketsCommand::List { category, paging }) => {
            let page = api
                .list_tickets(paging.request(TICKET_PAGE_SIZE), category)
                .await?;
            Ok(serde_json::to_value(page)?)
        }
        Command::BasePrice(BasePriceCommand::Set { profession, price }) => {
            api.set_base_price(profession, price).await?;
            Ok(json!({ "profession": profession.label(), "basePrice": price }))
        }
    }
}

async fn login(
    api: &AdminApi,
    timeout: Duration,
    name: &str,
    phone: &str,
    remember: bool,
) -> Result<Value> {
    let gateway = api.gateway();
    let session = admin_auth::login(
        gateway.http_client(),
        gateway.base_url(),
        name.trim(),
        phone.trim(),
        timeout,
    )
    .await?;

    let store = gateway.credential_store();
    store
        .store_login(&session)
        .await
        .context("failed to store session")?;
    if remember {
        store.remember_login(name.trim(), phone.trim()).await?;
    } else {
        store.forget_login().await?;
    }
    info!(role = ?session.role, "logged in");

    Ok(json!({ "role": session.role, "userId": session.user_id }))
}

async fn whoami(api: &AdminApi) -> Result<Value> {
    let store = api.gateway().credential_store();
    let (role, user_id) = store.identity().await;
    let saved = store.saved_login().await;
    Ok(json!({
        "loggedIn": store.access_token().await.is_some(),
        "role": role,
        "userId": user_id,
        "savedName": saved.as_ref().map(|(name, _)| name),
        "savedPhoneNo": saved.as_ref().map(|(_, phone)| phone),
    }))
}

async fn workers(api: &AdminApi, command: WorkersCommand) -> Result<Value> {
    let value = match command {
        WorkersCommand::List { status, paging } => serde_json::to_value(
            api.list_workers(paging.request(WORKER_PAGE_SIZE), status)
                .await?,
        )?,
        WorkersCommand::Get { id } => serde_json::to_value(api.get_worker(&id).await?)?,
        WorkersCommand::Search { name, id } => {
            let query = match (name, id) {
                (Some(name), _) => WorkerQuery::Name(name),
                (None, Some(id)) => WorkerQuery::Id(id),
                (None, None) => bail!("search needs --name or --id"),
            };
            serde_json::to_value(api.search_workers(&query).await?)?
        }
        WorkersCommand::Approve { id } => api.review_worker(&id, &WorkerAction::Approve).await?,
        WorkersCommand::Reject { id, reason } => {
            api.review_worker(&id, &WorkerAction::Reject { reason })
                .await?
        }
        WorkersCommand::Suspend {
            id,
            days,
            permanent,
            reason,
        } => {
            let days = if permanent {
                PERMANENT_SUSPENSION_DAYS
            } else {
                days.context("suspension needs --days or --permanent")?
            };
            api.review_worker(&id, &WorkerAction::Suspend { days, reason })
                .await?
        }
    };
    Ok(value)
}

async fn customers(api: &AdminApi, command: CustomersCommand) -> Result<Value> {
    Ok(match command {
        CustomersCommand::List { status, paging } => serde_json::to_value(
            api.list_customers(paging.request(CUSTOMER_PAGE_SIZE), Some(status))
                .await?,
        )?,
        CustomersCommand::Get { id } => api.get_customer(&id).await?,
        CustomersCommand::Search { id } => Value::Array(api.search_customers(&id).await?),
        CustomersCommand::Suspend { id, days, reason } => {
            api.suspend_customer(&id, days, &reason).await?
        }
    })
}

async fn complaints(api: &AdminApi, command: ComplaintsCommand) -> Result<Value> {
    Ok(match command {
        ComplaintsCommand::List { paging } => Value::Array(
            api.list_complaints(paging.request(COMPLAINT_PAGE_SIZE))
                .await?,
        ),
        ComplaintsCommand::Approve { id, remarks } => {
            let message = api.approve_complaint(&id, remarks.as_deref()).await?;
            json!({ "complaintId": id, "message": message })
        }
    })
}

async fn faqs(api: &AdminApi, command: FaqsCommand) -> Result<Value> {
    Ok(match command {
        FaqsCommand::List { paging } => {
            Value::Array(api.list_faqs(paging.request(FAQ_PAGE_SIZE)).await?)
        }
        FaqsCommand::Create {
            question,
            answer,
            category,
        } => {
            let faq = NewFaq::new(&question, &answer, category)?;
            let created = api.create_faq(&faq).await?;
            created.unwrap_or_else(|| json!(faq))
        }
        FaqsCommand::Delete { id } => {
            api.delete_faq(&id).await?;
            json!({ "deleted": id })
        }
    })
}
