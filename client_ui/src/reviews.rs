use std::cell::Cell;

use common_lib::review::Review;
use sycamore::{futures::spawn_local_scoped, prelude::*};

use crate::{
    api::ApiClient,
    formatting::{parse_submitted_at, rating_stars, submitted_at_str},
};

const FETCH_REVIEWS_ERROR: &str = "Failed to fetch reviews. Please try again.";

/// Orders reviews by submission time, newest first. The sort is stable, so
/// reviews with equal (or unparseable) timestamps keep their response
/// order; unparseable timestamps go last.
pub fn sort_by_recency(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| {
        parse_submitted_at(&b.submitted_at).cmp(&parse_submitted_at(&a.submitted_at))
    });
}

/// State machine behind the reviews panel, keyed by the externally supplied
/// app id. Each fetch cycle carries a monotonic tag; a resolved fetch whose
/// tag is no longer current must not overwrite state set up for a newer
/// selection.
pub(crate) struct ReviewsController<'a> {
    pub api: &'a dyn ApiClient,
    pub reviews: &'a Signal<Vec<Review>>,
    pub is_loading: &'a Signal<bool>,
    pub error: &'a Signal<String>,
    pub fetch_seq: &'a Cell<u64>,
}

impl ReviewsController<'_> {
    /// Synchronous part of a fetch cycle: resets to idle for an empty app
    /// id (no request goes out), otherwise enters the loading state and
    /// returns the tag for the request to be dispatched.
    pub fn begin(&self, app_id: &str) -> Option<u64> {
        let seq = self.fetch_seq.get().wrapping_add(1);
        self.fetch_seq.set(seq);

        if app_id.is_empty() {
            self.reviews.set(Vec::new());
            self.is_loading.set(false);
            self.error.set(String::new());
            return None;
        }

        self.is_loading.set(true);
        self.error.set(String::new());
        Some(seq)
    }

    /// Dispatches the request for the cycle tagged `seq` and applies its
    /// terminal state, unless a newer cycle superseded it meanwhile.
    pub async fn finish(&self, app_id: &str, seq: u64) {
        let result = self.api.recent_reviews(app_id).await;
        if self.fetch_seq.get() != seq {
            return;
        }
        match result {
            Ok(response) => {
                let mut fetched = response.reviews;
                sort_by_recency(&mut fetched);
                self.reviews.set(fetched);
            }
            Err(e) => {
                log::error!("can't fetch reviews for app {app_id}: {e}");
                self.reviews.set(Vec::new());
                self.error.set(FETCH_REVIEWS_ERROR.to_owned());
            }
        }
        self.is_loading.set(false);
    }
}

#[component(inline_props)]
pub fn ReviewsList<'a, G: Html>(
    cx: Scope<'a>,
    api: &'a dyn ApiClient,
    selected_app_id: &'a ReadSignal<String>,
) -> View<G> {
    let reviews = create_signal(cx, Vec::new());
    let is_loading = create_signal(cx, false);
    let error = create_signal(cx, String::new());
    let controller = create_ref(
        cx,
        ReviewsController {
            api,
            reviews,
            is_loading,
            error,
            fetch_seq: create_ref(cx, Cell::new(0)),
        },
    );

    create_effect(cx, move || {
        let app_id = (*selected_app_id.get()).clone();
        if let Some(seq) = controller.begin(&app_id) {
            spawn_local_scoped(cx, async move {
                controller.finish(&app_id, seq).await;
            });
        }
    });

    let count_str = create_memo(cx, || {
        let count = reviews.get().len();
        if count == 1 {
            "1 review".to_owned()
        } else {
            format!("{count} reviews")
        }
    });

    view! { cx,
        (if !error.get().is_empty() {
            let message = (*error.get()).clone();
            view! { cx,
                div(class="error_message") { (message) }
            }
        } else if *is_loading.get() {
            view! { cx,
                div(class="loading") { "Loading reviews..." }
            }
        } else if reviews.get().is_empty() {
            view! { cx,
                div(class="no_reviews") { "No reviews found for this app." }
            }
        } else {
            view! { cx,
                div(class="reviews_list") {
                    div(class="reviews_count") { (count_str.get()) }
                    Keyed(
                        iterable=reviews,
                        key=|review| review.id.clone(),
                        view=|cx, review| view! { cx,
                            ReviewCard(review=review)
                        },
                    )
                }
            }
        })
    }
}

#[component(inline_props)]
fn ReviewCard<G: Html>(cx: Scope, review: Review) -> View<G> {
    let stars = rating_stars(review.score);
    let score = format!("({}/5)", review.score);
    let submitted = submitted_at_str(&review.submitted_at);

    view! { cx,
        article(class="review_card") {
            div(class="review_header") {
                div(class="review_author") { (review.author) }
                div(class="review_score") {
                    span(class="stars") { (stars) }
                    span(class="score_number") { (score) }
                }
            }
            div(class="review_content") { (review.content) }
            div(class="review_date") { "Submitted: " (submitted) }
        }
    }
}
