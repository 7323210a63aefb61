//! Fintrack Frontend App
//!
//! Root component: provides shared context, loads reference data and
//! switches between the two pages.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::FinanceApi;
use crate::components::{LogPanel, RecurringPage, ToastStack, TransactionsPage};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::notifications::Notify;
use crate::store::{store_set_reference, FinanceState};
use crate::tasks::TaskScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Recurring,
    Transactions,
}

impl Page {
    const ALL: [Page; 2] = [Page::Transactions, Page::Recurring];

    fn label(&self) -> &'static str {
        match self {
            Page::Recurring => "Recurring",
            Page::Transactions => "Transactions",
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);
    log::info!("starting against {}", ctx.api().base_url());
    provide_context(Store::new(FinanceState::default()));

    let store = crate::store::use_finance_store();
    let scope = TaskScope::for_component();
    let (page, set_page) = signal(Page::Transactions);

    on_cleanup(move || ctx.notifier.teardown());

    // Categories and wallets are needed by every form
    let api = ctx.api();
    let notifier = ctx.notifier;
    scope.spawn(async move {
        let categories = api.list_categories().await;
        let wallets = api.list_wallets().await;
        match (categories, wallets) {
            (Ok(categories), Ok(wallets)) => {
                log::debug!("loaded {} categories, {} wallets", categories.len(), wallets.len());
                store_set_reference(&store, categories, wallets);
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("loading reference data failed: {}", e);
                notifier.error("Could not load categories and wallets");
            }
        }
    });

    view! {
        <div class="app-layout">
            <nav class="page-tabs">
                {Page::ALL.into_iter().map(|tab| view! {
                    <button
                        type="button"
                        class=move || if page.get() == tab { "page-tab active" } else { "page-tab" }
                        on:click=move |_| set_page.set(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </nav>

            <main class="main-content">
                {move || match page.get() {
                    Page::Transactions => view! { <TransactionsPage /> }.into_any(),
                    Page::Recurring => view! { <RecurringPage /> }.into_any(),
                }}
            </main>

            <LogPanel />
            <ToastStack />
        </div>
    }
}
