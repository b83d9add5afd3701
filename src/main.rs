use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

mod api;
mod charts;
mod filters;
mod pagination;

use api::{fetch_snapshot, CycleCounter, FetchError, Snapshot, Transaction};
use charts::{
    category_distribution, display_label, monthly_count_trend, monthly_flow, top_by_amount,
    FlowSeries, PieSlice, TrendSeries,
};
use filters::{FilterCriteria, FilterField};
use pagination::{paginate, DEFAULT_PAGE_SIZE};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const SETTINGS_STORAGE_KEY: &str = "momo_dashboard_settings";
const TOP_CATEGORY_COUNT: usize = 5;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
struct DashboardSettings {
    api_base_url: String,
    page_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn load_settings() -> DashboardSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<DashboardSettings>(&raw) {
                    return settings;
                }
            }
        }
    }
    DashboardSettings::default()
}

fn format_with_commas(value: i64) -> String {
    let is_negative = value < 0;
    let s = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn format_amount(amount: f64) -> String {
    format!("{} RWF", format_with_commas(amount.round() as i64))
}

#[derive(Properties, PartialEq)]
struct FilterBarProps {
    categories: Vec<String>,
    criteria: FilterCriteria,
    on_change: Callback<(FilterField, String)>,
    on_reset: Callback<()>,
}

#[function_component(FilterBar)]
fn filter_bar(props: &FilterBarProps) -> Html {
    let on_category = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                on_change.emit((FilterField::Category, select.value()));
            }
        })
    };
    let on_date = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_change.emit((FilterField::Date, input.value()));
            }
        })
    };
    let on_min_amount = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_change.emit((FilterField::MinAmount, input.value()));
            }
        })
    };
    let on_max_amount = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_change.emit((FilterField::MaxAmount, input.value()));
            }
        })
    };
    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_| on_reset.emit(()))
    };

    let selected_category = props.criteria.category.clone().unwrap_or_default();
    let date_value = props.criteria.date.clone().unwrap_or_default();
    let min_value = props
        .criteria
        .min_amount
        .map(|v| v.to_string())
        .unwrap_or_default();
    let max_value = props
        .criteria
        .max_amount
        .map(|v| v.to_string())
        .unwrap_or_default();

    html! {
        <div class="bg-white p-4 rounded-lg shadow mb-6">
            <h2 class="text-lg font-semibold mb-4">{"Filter Transactions"}</h2>
            <div class="grid grid-cols-1 md:grid-cols-5 gap-4">
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Category"}</label>
                    <select onchange={on_category}
                        class="w-full p-2 border border-gray-300 rounded-md">
                        <option value="" selected={selected_category.is_empty()}>{"All Categories"}</option>
                        { for props.categories.iter().map(|category| {
                            html! {
                                <option value={category.clone()} selected={*category == selected_category}>
                                    { display_label(category) }
                                </option>
                            }
                        }) }
                    </select>
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Date"}</label>
                    <input type="date" value={date_value} oninput={on_date}
                        class="w-full p-2 border border-gray-300 rounded-md" />
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Min Amount (RWF)"}</label>
                    <input type="number" value={min_value} oninput={on_min_amount} placeholder="0"
                        class="w-full p-2 border border-gray-300 rounded-md" />
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Max Amount (RWF)"}</label>
                    <input type="number" value={max_value} oninput={on_max_amount} placeholder="0"
                        class="w-full p-2 border border-gray-300 rounded-md" />
                </div>
                <div class="flex items-end">
                    <button onclick={on_reset}
                        class="w-full bg-yellow-400 hover:bg-yellow-500 text-gray-800 py-2 px-4 rounded-md transition duration-200">
                        {"Reset Filters"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryCardsProps {
    snapshot: Rc<Snapshot>,
}

#[function_component(SummaryCards)]
fn summary_cards(props: &SummaryCardsProps) -> Html {
    let summary = &props.snapshot.summary;
    let total_transactions: u64 = summary.iter().map(|entry| entry.count).sum();
    let total_amount: f64 = summary.iter().map(|entry| entry.total).sum();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-6">
            <div class="bg-white p-4 rounded-lg shadow">
                <h3 class="text-sm font-medium text-gray-500">{"Total Transactions"}</h3>
                <p class="text-2xl font-bold">{ total_transactions }</p>
            </div>
            <div class="bg-white p-4 rounded-lg shadow">
                <h3 class="text-sm font-medium text-gray-500">{"Total Amount"}</h3>
                <p class="text-2xl font-bold">{ format_amount(total_amount) }</p>
            </div>
            <div class="bg-white p-4 rounded-lg shadow">
                <h3 class="text-sm font-medium text-gray-500">{"Transaction Types"}</h3>
                <p class="text-2xl font-bold">{ summary.len() }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TransactionListProps {
    snapshot: Rc<Snapshot>,
    page_size: usize,
}

#[function_component(TransactionList)]
fn transaction_list(props: &TransactionListProps) -> Html {
    let page = use_state(|| 1usize);
    let selected = use_state(|| None::<Transaction>);

    // A new snapshot invalidates any page index into the old list.
    {
        let page = page.clone();
        use_effect_with_deps(
            move |_| {
                page.set(1);
                || ()
            },
            props.snapshot.clone(),
        );
    }

    let transactions = &props.snapshot.transactions;
    let view = paginate(transactions.len(), props.page_size, *page);

    let on_prev = {
        let page = page.clone();
        Callback::from(move |_| page.set(view.page.saturating_sub(1).max(1)))
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_| page.set((view.page + 1).min(view.total_pages)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };

    html! {
        <div class="bg-white p-4 rounded-lg shadow h-full">
            <h2 class="text-lg font-semibold mb-4">{"Recent Transactions"}</h2>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Date"}</th>
                            <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Type"}</th>
                            <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Amount"}</th>
                            <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Details"}</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        { for transactions[view.start..view.end].iter().map(|tx| {
                            let open = {
                                let selected = selected.clone();
                                let tx = tx.clone();
                                Callback::from(move |_| selected.set(Some(tx.clone())))
                            };
                            html! {
                                <tr key={tx.id.to_string()} class="hover:bg-gray-50 cursor-pointer" onclick={open}>
                                    <td class="px-4 py-2 whitespace-nowrap text-sm text-gray-500">{ &tx.date }</td>
                                    <td class="px-4 py-2 whitespace-nowrap text-sm font-medium text-gray-900">{ display_label(&tx.category) }</td>
                                    <td class="px-4 py-2 whitespace-nowrap text-sm text-gray-900">{ format_amount(tx.amount) }</td>
                                    <td class="px-4 py-2 whitespace-nowrap text-sm">
                                        <button class="text-green-500 hover:text-yellow-500">{"View"}</button>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                { if transactions.is_empty() {
                    html! { <p class="text-sm text-gray-500 py-4 text-center">{"No transactions match the current filters."}</p> }
                } else { html!{} } }
            </div>

            { if transactions.len() > props.page_size {
                html! {
                    <div class="flex justify-between items-center mt-4">
                        <button onclick={on_prev} disabled={view.page == 1}
                            class={if view.page == 1 { "px-4 py-2 rounded-md bg-gray-200 text-gray-500" } else { "px-4 py-2 rounded-md bg-blue-600 text-white" }}>
                            {"Previous"}
                        </button>
                        <span class="text-sm text-gray-700">
                            { format!("Page {} of {}", view.page, view.total_pages) }
                        </span>
                        <button onclick={on_next} disabled={view.page == view.total_pages}
                            class={if view.page == view.total_pages { "px-4 py-2 rounded-md bg-gray-200 text-gray-500" } else { "px-4 py-2 rounded-md bg-green-600 text-white" }}>
                            {"Next"}
                        </button>
                    </div>
                }
            } else { html!{} } }

            { if let Some(tx) = &*selected {
                transaction_modal(tx, on_close)
            } else { html!{} } }
        </div>
    }
}

fn detail_field(label: &'static str, value: String) -> Html {
    html! {
        <div>
            <p class="text-sm font-medium text-gray-500">{ label }</p>
            <p class="mt-1 text-sm text-gray-900">{ value }</p>
        </div>
    }
}

fn transaction_modal(tx: &Transaction, on_close: Callback<MouseEvent>) -> Html {
    let reference = tx.reference.clone().unwrap_or_else(|| "N/A".to_string());
    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center p-4 z-50">
            <div class="bg-white rounded-lg shadow-xl max-w-2xl w-full max-h-screen overflow-y-auto">
                <div class="p-6">
                    <div class="flex justify-between items-start">
                        <h3 class="text-xl font-bold">{"Transaction Details"}</h3>
                        <button onclick={on_close.clone()} class="text-gray-500 hover:text-gray-700">{"✕"}</button>
                    </div>
                    <div class="mt-6 space-y-4">
                        <div class="grid grid-cols-2 gap-4">
                            { detail_field("Transaction Type", display_label(&tx.category)) }
                            { detail_field("Date & Time", tx.date.clone()) }
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            { detail_field("Amount", format_amount(tx.amount)) }
                            { detail_field("Reference", reference) }
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            { if let Some(sender) = &tx.sender {
                                detail_field("Sender", sender.clone())
                            } else { html!{} } }
                            { if let Some(receiver) = &tx.receiver {
                                detail_field("Receiver", receiver.clone())
                            } else { html!{} } }
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            { if let Some(fee) = tx.fee {
                                detail_field("Fee", format_amount(fee))
                            } else { html!{} } }
                            { if let Some(balance) = tx.balance {
                                detail_field("Balance After", format_amount(balance))
                            } else { html!{} } }
                        </div>
                        { if let Some(body) = &tx.raw_body {
                            html! {
                                <div>
                                    <p class="text-sm font-medium text-gray-500">{"Full Message"}</p>
                                    <p class="mt-1 text-sm text-gray-900 bg-gray-50 p-3 rounded">{ body }</p>
                                </div>
                            }
                        } else { html!{} } }
                    </div>
                    <div class="mt-6 flex justify-end">
                        <button onclick={on_close}
                            class="px-4 py-2 bg-blue-900 text-white rounded-md hover:bg-orange-500">
                            {"Close"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ChartsPanelProps {
    snapshot: Rc<Snapshot>,
}

#[function_component(ChartsPanel)]
fn charts_panel(props: &ChartsPanelProps) -> Html {
    let slices = category_distribution(&props.snapshot.summary);
    let top = top_by_amount(&props.snapshot.summary, TOP_CATEGORY_COUNT);

    let monthly = match (
        monthly_count_trend(&props.snapshot.monthly),
        monthly_flow(&props.snapshot.monthly),
    ) {
        (Ok(trend), Ok(flow)) => Ok((trend, flow)),
        (Err(err), _) | (_, Err(err)) => Err(err),
    };

    html! {
        <div class="bg-white p-4 rounded-lg shadow">
            <h2 class="text-lg font-semibold mb-4">{"Transaction Analytics"}</h2>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mb-6">
                <div>
                    <h3 class="text-md font-medium mb-2">{"Transactions by Type"}</h3>
                    { pie_chart(&slices) }
                </div>
                <div>
                    <h3 class="text-md font-medium mb-2">{ format!("Top {} Categories by Amount", TOP_CATEGORY_COUNT) }</h3>
                    { top_categories_chart(&top) }
                </div>
            </div>
            { match monthly {
                Ok((trend, flow)) => html! {
                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div>
                            <h3 class="text-md font-medium mb-2">{"Monthly Transaction Count"}</h3>
                            { trend_chart(&trend) }
                        </div>
                        <div>
                            <h3 class="text-md font-medium mb-2">{"Monthly Amounts (Income vs Expenses)"}</h3>
                            { flow_chart(&flow) }
                        </div>
                    </div>
                },
                Err(err) => {
                    log::error!("monthly charts unavailable: {err}");
                    html! {
                        <div class="bg-red-50 border border-red-300 text-red-700 p-4 rounded">
                            { format!("Monthly charts unavailable: {err}") }
                        </div>
                    }
                }
            } }
        </div>
    }
}

fn polar(cx: f64, cy: f64, r: f64, frac: f64) -> (f64, f64) {
    let angle = frac * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2;
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (sx, sy) = polar(cx, cy, r, start);
    let (ex, ey) = polar(cx, cy, r, end);
    let large_arc = if end - start > 0.5 { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {sx:.2} {sy:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {ex:.2} {ey:.2} Z")
}

fn pie_chart(slices: &[PieSlice]) -> Html {
    let total: u64 = slices.iter().map(|slice| slice.value).sum();
    if total == 0 {
        return html! { <p class="text-sm text-gray-500">{"No summary data yet."}</p> };
    }

    let (cx, cy, r) = (100.0, 100.0, 90.0);
    let mut cursor = 0.0;
    let mut paths = Vec::new();
    for slice in slices.iter().filter(|slice| slice.value > 0) {
        let frac = slice.value as f64 / total as f64;
        if frac >= 1.0 {
            paths.push(html! {
                <circle cx={cx.to_string()} cy={cy.to_string()} r={r.to_string()}
                    fill={slice.color} stroke="#ffffff" stroke-width="2" />
            });
            break;
        }
        let d = arc_path(cx, cy, r, cursor, cursor + frac);
        cursor += frac;
        paths.push(html! {
            <path d={d} fill={slice.color} stroke="#ffffff" stroke-width="2" />
        });
    }

    html! {
        <div class="flex items-center gap-4">
            <svg viewBox="0 0 200 200" class="w-40 h-40 shrink-0">
                { for paths.into_iter() }
            </svg>
            <ul class="space-y-1 text-sm">
                { for slices.iter().map(|slice| {
                    let percentage = slice.value as f64 * 100.0 / total as f64;
                    html! {
                        <li class="flex items-center gap-2">
                            <span class="w-3 h-3 rounded-full inline-block shrink-0"
                                style={format!("background-color: {}", slice.color)}></span>
                            <span class="text-gray-700">
                                { format!("{}: {} ({:.1}%)", slice.label, slice.value, percentage) }
                            </span>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}

fn top_categories_chart(entries: &[charts::BarEntry]) -> Html {
    if entries.is_empty() {
        return html! { <p class="text-sm text-gray-500">{"No summary data yet."}</p> };
    }
    let max_total = entries
        .iter()
        .fold(0.0f64, |acc, entry| acc.max(entry.total))
        .max(1.0);

    html! {
        <div class="space-y-2">
            { for entries.iter().map(|entry| {
                let percent = entry.total * 100.0 / max_total;
                html! {
                    <div class="flex flex-col gap-1 text-sm">
                        <div class="flex items-center justify-between">
                            <span class="text-gray-700">{ &entry.label }</span>
                            <span class="font-semibold">{ format_amount(entry.total) }</span>
                        </div>
                        <div class="h-2 w-full bg-gray-100 rounded-full overflow-hidden">
                            <div class="h-full rounded-full"
                                style={format!("width: {:.1}%; background-color: {}", percent, entry.color)}></div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

fn trend_chart(trend: &TrendSeries) -> Html {
    if trend.counts.is_empty() {
        return html! { <p class="text-sm text-gray-500">{"No monthly data yet."}</p> };
    }

    let (width, height, pad) = (560.0, 220.0, 30.0);
    let plot_w = width - 2.0 * pad;
    let plot_h = height - 2.0 * pad;
    let max_count = trend.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let step = plot_w / (trend.counts.len().saturating_sub(1).max(1)) as f64;

    let coords: Vec<(f64, f64)> = trend
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let x = pad + i as f64 * step;
            let y = pad + plot_h - (*count as f64 / max_count) * plot_h;
            (x, y)
        })
        .collect();
    let points = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        <svg viewBox={format!("0 0 {width} {height}")} class="w-full">
            <polyline points={points} fill="none" stroke="#3B82F6" stroke-width="2" />
            { for coords.iter().zip(trend.counts.iter()).map(|((x, y), count)| html! {
                <>
                    <circle cx={format!("{x:.1}")} cy={format!("{y:.1}")} r="3" fill="#3B82F6" />
                    <text x={format!("{x:.1}")} y={format!("{:.1}", y - 8.0)}
                        text-anchor="middle" font-size="10" fill="#374151">{ *count }</text>
                </>
            }) }
            { for coords.iter().zip(trend.labels.iter()).map(|((x, _), label)| html! {
                <text x={format!("{x:.1}")} y={format!("{:.1}", height - 8.0)}
                    text-anchor="middle" font-size="10" fill="#6B7280">{ label.clone() }</text>
            }) }
        </svg>
    }
}

fn flow_chart(flow: &FlowSeries) -> Html {
    if flow.labels.is_empty() {
        return html! { <p class="text-sm text-gray-500">{"No monthly data yet."}</p> };
    }
    let max_amount = flow
        .incoming
        .iter()
        .chain(flow.outgoing.iter())
        .fold(0.0f64, |acc, amount| acc.max(*amount))
        .max(1.0);

    html! {
        <div class="space-y-3">
            { for flow.labels.iter().enumerate().map(|(i, label)| {
                let incoming = flow.incoming[i];
                let outgoing = flow.outgoing[i];
                html! {
                    <div class="text-sm">
                        <p class="text-gray-700 mb-1">{ label.clone() }</p>
                        <div class="flex items-center gap-2">
                            <div class="h-2 bg-green-500 rounded-full"
                                style={format!("width: {:.1}%", incoming * 100.0 / max_amount)}></div>
                            <span class="text-xs text-gray-500 whitespace-nowrap">{ format!("In: {}", format_amount(incoming)) }</span>
                        </div>
                        <div class="flex items-center gap-2 mt-1">
                            <div class="h-2 bg-red-500 rounded-full"
                                style={format!("width: {:.1}%", outgoing * 100.0 / max_amount)}></div>
                            <span class="text-xs text-gray-500 whitespace-nowrap">{ format!("Out: {}", format_amount(outgoing)) }</span>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let settings = use_state(load_settings);
    let filters = use_state(FilterCriteria::default);
    let snapshot = use_state(|| None::<Rc<Snapshot>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let cycles = use_mut_ref(CycleCounter::default);

    // Any criteria change starts a fresh fetch cycle; a cycle may only
    // publish while it is still the latest one begun.
    {
        let snapshot = snapshot.clone();
        let loading = loading.clone();
        let error = error.clone();
        let cycles = cycles.clone();
        let api_base_url = settings.api_base_url.clone();
        use_effect_with_deps(
            move |criteria: &FilterCriteria| {
                let criteria = criteria.clone();
                let generation = cycles.borrow().begin();
                loading.set(true);
                spawn_local(async move {
                    let cached = (*snapshot).as_ref().map(|snap| snap.categories.clone());
                    let result = fetch_snapshot(&api_base_url, &criteria, cached).await;
                    if !cycles.borrow().is_current(generation) {
                        log::debug!("{}", FetchError::Superseded { generation });
                        return;
                    }
                    match result {
                        Ok(snap) => {
                            snapshot.set(Some(Rc::new(snap)));
                            error.set(None);
                        }
                        Err(err) => {
                            log::error!("fetch cycle {generation} failed: {err}");
                            error.set(Some(err.to_string()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (*filters).clone(),
        );
    }

    let on_filter_change = {
        let filters = filters.clone();
        Callback::from(move |(field, value): (FilterField, String)| {
            filters.set(filters.with_field(field, &value));
        })
    };
    let on_reset = {
        let filters = filters.clone();
        Callback::from(move |_| filters.set(FilterCriteria::default()))
    };

    let body = match &*snapshot {
        None => {
            let message = match &*error {
                Some(message) => html! {
                    <div class="text-center">
                        <p class="text-xl font-semibold text-red-600">{"Could not load data"}</p>
                        <p class="text-sm text-gray-500 mt-2">{ message.clone() }</p>
                    </div>
                },
                None => html! { <div class="text-xl font-semibold">{"Loading data..."}</div> },
            };
            html! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    { message }
                </div>
            }
        }
        Some(snap) => {
            let snap = snap.clone();
            html! {
                <main class="container mx-auto p-4">
                    { if let Some(message) = &*error {
                        html! {
                            <div class="bg-red-50 border border-red-300 text-red-700 p-3 rounded mb-4">
                                { format!("Refresh failed, showing previous data: {message}") }
                            </div>
                        }
                    } else { html!{} } }
                    <FilterBar
                        categories={snap.categories.clone()}
                        criteria={(*filters).clone()}
                        on_change={on_filter_change}
                        on_reset={on_reset} />
                    <SummaryCards snapshot={snap.clone()} />
                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mt-6">
                        <div class="lg:col-span-2">
                            <ChartsPanel snapshot={snap.clone()} />
                        </div>
                        <div>
                            <TransactionList snapshot={snap} page_size={settings.page_size} />
                        </div>
                    </div>
                </main>
            }
        }
    };

    html! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-blue-900 text-yellow-300 p-4 shadow-md flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"MoMo Transaction Dashboard"}</h1>
                { if *loading {
                    html! { <span class="text-sm text-yellow-100">{"Refreshing..."}</span> }
                } else { html!{} } }
            </header>
            { body }
        </div>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1_000), "1,000");
        assert_eq!(format_with_commas(1_234_567), "1,234,567");
        assert_eq!(format_with_commas(-50_000), "-50,000");
    }

    #[test]
    fn amounts_render_as_whole_rwf() {
        assert_eq!(format_amount(2_000.0), "2,000 RWF");
        assert_eq!(format_amount(1_234.6), "1,235 RWF");
        assert_eq!(format_amount(0.0), "0 RWF");
    }

    #[test]
    fn default_settings_point_at_the_local_backend() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
    }
}
