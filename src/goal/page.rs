//! The savings goal page: the creation form and the list of goal cards.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    alert::{ALERT_CONTAINER_ID, Alert},
    endpoints::{self, format_endpoint},
    goal::{GoalProgress, GoalState, SavingsGoal, WeeksRemaining},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, STAT_TILE_STYLE, base,
        format_currency,
    },
};

/// The ID of the element that holds the goal cards.
pub const GOAL_LIST_ID: &str = "goal-list";
const NEW_GOAL_FORM_ID: &str = "new-goal-form";

/// Render the page with the goal form and every goal, newest first.
pub async fn get_goals_page(State(state): State<GoalState>) -> Result<Response, Error> {
    let goals = state
        .store
        .list_goals()
        .await
        .inspect_err(|error| tracing::error!("Failed to retrieve goals: {error}"))?;

    Ok(goals_view(&goals).into_response())
}

/// Re-read the goal list and return it with `alert` swapped in out-of-band.
///
/// Mutation handlers call this after the store has accepted a change, so the
/// list always reflects a fresh read rather than a patched copy.
pub(crate) async fn goal_list_response(state: &GoalState, alert: Alert) -> Response {
    goal_list_response_with(state, alert, None).await
}

/// Like [goal_list_response], with `extra` out-of-band markup appended.
pub(crate) async fn goal_list_response_with(
    state: &GoalState,
    alert: Alert,
    extra: Option<Markup>,
) -> Response {
    match state.store.list_goals().await {
        Ok(goals) => Html(
            html! {
                (goal_list_content(&goals))
                (alert.into_oob_html())
                @if let Some(extra) = extra {
                    (extra)
                }
            }
            .into_string(),
        )
        .into_response(),
        Err(error) => error.into_alert_response(
            "Your change was saved but the goal list could not be refreshed",
        ),
    }
}

fn goals_view(goals: &[SavingsGoal]) -> Markup {
    let content = html! {
        header class="border-b border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-800"
        {
            div class="px-6 py-6 mx-auto max-w-screen-xl"
            {
                h1 class="text-3xl font-bold text-blue-600 dark:text-blue-500"
                {
                    "Savings Tracker"
                }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Plan your purchases, reach your goals"
                }
            }
        }

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="grid gap-8 lg:grid-cols-[400px_1fr]"
            {
                div class="lg:sticky lg:top-8 lg:h-fit" { (new_goal_form_view(false)) }

                div id=(GOAL_LIST_ID) { (goal_list_content(goals)) }
            }
        }
    };

    base("Savings Goals", &content)
}

/// The goal creation form. Set `out_of_band` to swap in a blank form after a
/// goal has been added.
pub(crate) fn new_goal_form_view(out_of_band: bool) -> Markup {
    let alert_target = format!("#{ALERT_CONTAINER_ID}");
    let list_target = format!("#{GOAL_LIST_ID}");

    html! {
        section
            id=(NEW_GOAL_FORM_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
            class=(CARD_STYLE)
        {
            h2 class="mb-4 text-xl font-semibold" { "Add New Savings Goal" }

            form
                hx-post=(endpoints::GOALS_API)
                hx-target=(list_target)
                hx-target-error=(alert_target)
                class="w-full space-y-4"
            {
                div
                {
                    label for="product_name" class=(FORM_LABEL_STYLE) { "Product Name" }

                    input
                        id="product_name"
                        type="text"
                        name="product_name"
                        placeholder="e.g., New Laptop"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="target_price" class=(FORM_LABEL_STYLE) { "Target Price (₹)" }

                    input
                        id="target_price"
                        type="number"
                        name="target_price"
                        step="0.01"
                        min="0"
                        placeholder="e.g., 1500"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="weekly_savings" class=(FORM_LABEL_STYLE) { "Weekly Savings (₹)" }

                    input
                        id="weekly_savings"
                        type="number"
                        name="weekly_savings"
                        step="0.01"
                        min="0"
                        placeholder="e.g., 50"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="current_savings" class=(FORM_LABEL_STYLE)
                    {
                        "Current Savings (₹, optional)"
                    }

                    input
                        id="current_savings"
                        type="number"
                        name="current_savings"
                        step="0.01"
                        min="0"
                        placeholder="0"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Goal" }
            }
        }
    }
}

/// The contents of the goal list element: a heading with the goal count and
/// one card per goal, or a placeholder when there are no goals.
pub(crate) fn goal_list_content(goals: &[SavingsGoal]) -> Markup {
    if goals.is_empty() {
        return html! {
            div
                class="flex min-h-[400px] items-center justify-center rounded-lg
                    border-2 border-dashed border-gray-300 p-8 text-center
                    dark:border-gray-600"
            {
                div
                {
                    h3 class="mb-2 text-xl font-semibold" { "No Savings Goals Yet" }

                    p class="max-w-sm text-gray-500 dark:text-gray-400"
                    {
                        "Start by adding your first savings goal to track your \
                        progress toward your dream purchase!"
                    }
                }
            }
        };
    }

    let goal_count = match goals.len() {
        1 => "1 Goal".to_owned(),
        count => format!("{count} Goals"),
    };

    html! {
        div class="space-y-6"
        {
            div class="flex items-center justify-between"
            {
                h2 class="text-2xl font-bold" { "Your Goals" }

                span
                    data-goal-count
                    class="rounded-full bg-blue-100 px-4 py-1 text-sm font-semibold
                        text-blue-700 dark:bg-blue-900 dark:text-blue-300"
                {
                    (goal_count)
                }
            }

            div class="grid gap-6 md:grid-cols-2"
            {
                @for goal in goals {
                    (goal_card_view(goal))
                }
            }
        }
    }
}

fn goal_card_view(goal: &SavingsGoal) -> Markup {
    let progress = GoalProgress::from(goal);
    let delete_url = format_endpoint(endpoints::GOAL, goal.id);
    let deposit_url = format_endpoint(endpoints::GOAL_DEPOSIT, goal.id);
    let withdraw_url = format_endpoint(endpoints::GOAL_WITHDRAW, goal.id);
    let savings_url = format_endpoint(endpoints::GOAL_SAVINGS, goal.id);
    let list_target = format!("#{GOAL_LIST_ID}");
    let alert_target = format!("#{ALERT_CONTAINER_ID}");
    let confirm_message = format!(
        "Are you sure you want to delete the goal for '{}'? This cannot be undone.",
        goal.product_name
    );
    let time_to_goal = match progress.weeks_remaining {
        WeeksRemaining::Never => "Never at this rate".to_owned(),
        weeks => weeks.to_string(),
    };

    html! {
        article class=(CARD_STYLE) data-goal-id=(goal.id.to_string())
        {
            div class="flex items-start justify-between mb-4"
            {
                h3 class="text-xl font-semibold" { (goal.product_name.as_ref()) }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target=(list_target)
                    hx-target-error=(alert_target)
                    hx-confirm=(confirm_message)
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }

            div class="space-y-2 mb-4"
            {
                div class="flex justify-between text-sm"
                {
                    span class="text-gray-500 dark:text-gray-400" { "Progress" }
                    span data-progress class="font-semibold text-blue-600 dark:text-blue-400"
                    {
                        (format!("{:.1}%", progress.progress_percent))
                    }
                }

                div class="h-2.5 w-full rounded-full bg-gray-200 dark:bg-gray-700"
                {
                    div
                        class="h-2.5 rounded-full bg-blue-600"
                        style={ "width: " (format!("{:.1}", progress.progress_percent)) "%" } {}
                }
            }

            div class="grid grid-cols-2 gap-3 mb-4"
            {
                div class=(STAT_TILE_STYLE)
                {
                    p class="text-xs text-gray-500 dark:text-gray-400 mb-1" { "Target Price" }
                    p data-target-price class="text-lg font-bold" { (format_currency(goal.target_price)) }
                }

                div class=(STAT_TILE_STYLE)
                {
                    p class="text-xs text-gray-500 dark:text-gray-400 mb-1" { "Current Savings" }
                    p data-current-savings class="text-lg font-bold text-blue-600 dark:text-blue-400"
                    {
                        (format_currency(goal.current_savings))
                    }
                }
            }

            div class="flex items-center justify-between mb-4 rounded-lg border border-blue-200 p-3 dark:border-blue-900"
            {
                div
                {
                    p class="text-xs text-gray-500 dark:text-gray-400 mb-1" { "Time to Goal" }
                    p data-weeks-remaining class="text-2xl font-bold" { (time_to_goal) }
                }

                div class="text-right"
                {
                    p class="text-xs text-gray-500 dark:text-gray-400 mb-1" { "Weekly Savings" }
                    p class="text-lg font-semibold text-blue-600 dark:text-blue-400"
                    {
                        (format_currency(goal.weekly_savings))
                    }
                }
            }

            @if progress.is_achieved {
                p data-achieved class="mb-4 text-center font-semibold text-green-700 dark:text-green-400"
                {
                    "🎉 Goal achieved!"
                }
            } @else {
                p class="mb-4 text-center text-sm text-gray-500 dark:text-gray-400"
                {
                    span data-remaining class="font-semibold text-gray-900 dark:text-white"
                    {
                        (format_currency(progress.remaining))
                    }
                    " left to save"
                }

                details class="mb-3 rounded-lg border border-gray-200 p-3 dark:border-gray-700"
                {
                    summary class="cursor-pointer text-sm font-medium" { "Add Weekly Progress" }

                    (amount_form_view(
                        &deposit_url,
                        &format!("deposit-{}", goal.id),
                        "Add Amount (₹)",
                        "e.g., 500",
                        None,
                        "Add",
                    ))
                }
            }

            @if goal.current_savings > 0.0 {
                details class="mb-3 rounded-lg border border-red-200 p-3 dark:border-red-900"
                {
                    summary class="cursor-pointer text-sm font-medium text-red-600 dark:text-red-400"
                    {
                        "Spend / Remove Money"
                    }

                    (amount_form_view(
                        &withdraw_url,
                        &format!("withdraw-{}", goal.id),
                        "Remove Amount (₹)",
                        &format!("Max: {}", goal.current_savings),
                        Some(goal.current_savings),
                        "Remove",
                    ))
                }
            }

            details class="rounded-lg border border-gray-200 p-3 dark:border-gray-700"
            {
                summary class="cursor-pointer text-sm font-medium" { "Correct Savings Total" }

                form
                    hx-put=(savings_url)
                    hx-target=(list_target)
                    hx-target-error=(alert_target)
                    class="mt-3 space-y-3"
                {
                    label for=(format!("savings-{}", goal.id)) class=(FORM_LABEL_STYLE)
                    {
                        "Total Saved (₹)"
                    }

                    div class="flex gap-2"
                    {
                        input
                            id=(format!("savings-{}", goal.id))
                            type="number"
                            name="current_savings"
                            step="0.01"
                            min="0"
                            value=(goal.current_savings)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);

                        button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Save" }
                    }
                }
            }
        }
    }
}

fn amount_form_view(
    endpoint: &str,
    input_id: &str,
    label: &str,
    placeholder: &str,
    max: Option<f64>,
    submit_text: &str,
) -> Markup {
    let list_target = format!("#{GOAL_LIST_ID}");
    let alert_target = format!("#{ALERT_CONTAINER_ID}");

    html! {
        form
            hx-post=(endpoint)
            hx-target=(list_target)
            hx-target-error=(alert_target)
            class="mt-3 space-y-3"
        {
            label for=(input_id) class=(FORM_LABEL_STYLE) { (label) }

            div class="flex gap-2"
            {
                input
                    id=(input_id)
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    max=[max]
                    placeholder=(placeholder)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { (submit_text) }
            }
        }
    }
}
