use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use routeplan_core::{
    AnalyticsSeries, FavoriteDraft, FavoriteRecord, GeocodedPoint, PlaceQuery, RouteRequest,
    RouteResult, TravelMode, UnitSystem, Waypoint,
};

use crate::display::{DisplayModel, SegmentHighlight};
use crate::provider::Providers;
use crate::render::RouteRenderer;
use crate::session::{DisplayedRoute, RequestToken, Session, SessionState};
use crate::RouteError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw form input for one route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInput {
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
    pub unit_system: UnitSystem,
}

impl RouteInput {
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: TravelMode::default(),
            unit_system: UnitSystem::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, travel_mode: TravelMode) -> Self {
        self.travel_mode = travel_mode;
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    fn to_request(&self) -> Result<RouteRequest, RouteError> {
        let origin = PlaceQuery::new(&self.origin)
            .map_err(|_| RouteError::Validation("Please enter a starting location.".into()))?;
        let destination = PlaceQuery::new(&self.destination)
            .map_err(|_| RouteError::Validation("Please enter a destination.".into()))?;
        Ok(RouteRequest {
            origin: Waypoint::Query(origin),
            destination: Waypoint::Query(destination),
            travel_mode: self.travel_mode,
            unit_system: self.unit_system,
        })
    }
}

struct Inner<R> {
    session: Session,
    renderer: R,
}

/// Coordinates geocoding, routing, display and favorites for one session.
///
/// All methods take `&self`; the session and renderer sit behind one mutex
/// that is never held across an `.await`, so overlapping calls are safe and
/// only the most recently issued submit can reach the renderer.
pub struct Orchestrator<R> {
    providers: Providers,
    timeout: Duration,
    inner: Mutex<Inner<R>>,
}

impl<R: RouteRenderer> Orchestrator<R> {
    #[must_use]
    pub fn new(providers: Providers, renderer: R) -> Self {
        Self {
            providers,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            inner: Mutex::new(Inner {
                session: Session::default(),
                renderer,
            }),
        }
    }

    /// Bounded wait for one submit chain.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().session.state()
    }

    #[must_use]
    pub fn last_route(&self) -> Option<RouteResult> {
        self.lock().session.current().map(|r| r.result.clone())
    }

    #[must_use]
    pub fn display_model(&self) -> Option<DisplayModel> {
        self.lock().session.current().map(|r| r.model.clone())
    }

    /// Index of the highlighted step, if any.
    #[must_use]
    pub fn active_highlight(&self) -> Option<usize> {
        self.lock().session.highlight()
    }

    /// The message currently shown for the last failed submit.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().session.message().map(str::to_string)
    }

    /// Runs `f` against the renderer.
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.lock().renderer)
    }

    /// Geocodes one place name to its highest-ranked match.
    ///
    /// # Errors
    ///
    /// [`RouteError::Validation`] for a blank query, [`RouteError::NotFound`]
    /// for zero matches, [`RouteError::Provider`] for provider failures.
    pub async fn resolve_place(&self, raw: &str) -> Result<GeocodedPoint, RouteError> {
        let query = PlaceQuery::new(raw)
            .map_err(|_| RouteError::Validation("Please enter a location.".into()))?;
        self.providers.geocoder.geocode(&query).await
    }

    /// Resolves any unresolved waypoint (unless the provider takes place
    /// names) and fetches the best-ranked route.
    ///
    /// # Errors
    ///
    /// Any error from [`Orchestrator::resolve_place`], plus
    /// [`RouteError::NoRouteFound`] and [`RouteError::Provider`] from routing.
    pub async fn fetch_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let request = self.resolve_waypoints(request).await?;
        self.providers.router.route(&request).await
    }

    async fn resolve_waypoints(&self, request: &RouteRequest) -> Result<RouteRequest, RouteError> {
        if self.providers.router.accepts_place_names() {
            return Ok(request.clone());
        }
        let origin = self.resolve_waypoint(&request.origin).await?;
        let destination = self.resolve_waypoint(&request.destination).await?;
        Ok(RouteRequest {
            origin,
            destination,
            ..request.clone()
        })
    }

    async fn resolve_waypoint(&self, waypoint: &Waypoint) -> Result<Waypoint, RouteError> {
        match waypoint {
            Waypoint::Point(_) => Ok(waypoint.clone()),
            Waypoint::Query(query) => Ok(Waypoint::Point(
                self.providers.geocoder.geocode(query).await?,
            )),
        }
    }

    /// Replaces whatever is on screen with `result`: clears the renderer,
    /// then shows the new route. Supersedes any submit in flight.
    pub fn render(&self, request: &RouteRequest, result: RouteResult) -> DisplayModel {
        let mut inner = self.lock();
        inner.session.begin();
        Self::commit(&mut inner, request, result)
    }

    /// Shows `result` as the current route. Callers hold the lock and have
    /// checked that their token is still current.
    fn commit(inner: &mut Inner<R>, request: &RouteRequest, result: RouteResult) -> DisplayModel {
        let model = DisplayModel::new(
            request.origin.label(),
            request.destination.label(),
            request.travel_mode,
            request.unit_system,
            &result,
        );
        inner.session.show(DisplayedRoute {
            result,
            model: model.clone(),
        });
        inner.renderer.clear();
        inner.renderer.show_route(&model);
        model
    }

    /// Full chain for one form submission: validate, resolve, route, display.
    ///
    /// A newer `submit` or a [`clear`](Orchestrator::clear) supersedes this
    /// one; its result is then dropped with [`RouteError::Stale`] and never
    /// reaches the session or renderer.
    ///
    /// # Errors
    ///
    /// Every [`RouteError`] kind. All but `Stale` have already been shown
    /// through the renderer when this returns.
    pub async fn submit(&self, input: &RouteInput) -> Result<DisplayModel, RouteError> {
        let token = self.lock().session.begin();
        tracing::debug!(token = token.value(), origin = %input.origin, destination = %input.destination, "route submit");

        let outcome = match input.to_request() {
            Ok(request) => {
                match tokio::time::timeout(self.timeout, self.run_chain(token, &request)).await {
                    Ok(Ok(result)) => Ok((request, result)),
                    Ok(Err(e)) => Err(e),
                    Err(_) => Err(RouteError::Timeout),
                }
            }
            Err(e) => Err(e),
        };

        let mut inner = self.lock();
        if !inner.session.is_current(token) {
            tracing::debug!(token = token.value(), "dropping stale route response");
            return Err(RouteError::Stale);
        }
        match outcome {
            Ok((request, result)) => {
                let model = Self::commit(&mut inner, &request, result);
                tracing::info!(
                    token = token.value(),
                    distance = %model.distance,
                    duration = %model.duration,
                    steps = model.steps.len(),
                    "route displayed"
                );
                Ok(model)
            }
            Err(e) if !e.is_user_visible() => Err(e),
            Err(e) => {
                let message = e.to_string();
                inner.session.fail(token, message.clone())?;
                inner.renderer.clear();
                inner.renderer.show_error(&message);
                tracing::warn!(token = token.value(), error = %message, "route request failed");
                Err(e)
            }
        }
    }

    async fn run_chain(
        &self,
        token: RequestToken,
        request: &RouteRequest,
    ) -> Result<RouteResult, RouteError> {
        let resolved = self.resolve_waypoints(request).await?;
        self.lock().session.advance(token, SessionState::Routing)?;
        self.providers.router.route(&resolved).await
    }

    /// Cancels any pending submit, drops the current route and highlight,
    /// clears the renderer and returns to `Idle`.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.session.clear();
        inner.renderer.clear();
    }

    /// Highlights the segment of step `index` of the displayed route,
    /// retiring any previous highlight.
    ///
    /// # Errors
    ///
    /// [`RouteError::Validation`] when no route is displayed or `index` is
    /// out of range.
    pub fn highlight_instruction(&self, index: usize) -> Result<SegmentHighlight, RouteError> {
        let mut inner = self.lock();
        let current = inner
            .session
            .current()
            .ok_or_else(|| RouteError::Validation("No route is displayed.".into()))?;
        let step = current.result.steps().get(index).ok_or_else(|| {
            RouteError::Validation(format!(
                "Step {} does not exist; the route has {} steps.",
                index + 1,
                current.result.steps().len()
            ))
        })?;
        let highlight = SegmentHighlight {
            step_index: index,
            text: step.text.clone(),
            interval: step.interval,
            points: current.result.segment(step.interval).to_vec(),
        };
        inner.session.set_highlight(index);
        inner.renderer.highlight_segment(&highlight);
        Ok(highlight)
    }

    /// Saves the displayed route under `name`.
    ///
    /// # Errors
    ///
    /// [`RouteError::Validation`] for a blank name or when no route is
    /// displayed (no network call is made), [`RouteError::Provider`] with
    /// the store's message when saving fails.
    pub async fn save_favorite(&self, name: &str) -> Result<i64, RouteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RouteError::Validation(
                "Please enter a name for this favorite route.".into(),
            ));
        }
        let draft = {
            let inner = self.lock();
            let current = inner.session.current().ok_or_else(|| {
                RouteError::Validation("Get a route before saving it as a favorite.".into())
            })?;
            FavoriteDraft {
                name: name.to_string(),
                from: current.model.origin.clone(),
                to: current.model.destination.clone(),
                vehicle: current.travel_mode().profile().to_string(),
                unit: current.unit_system().symbol().to_string(),
                distance: current.model.distance.clone(),
                time: current.model.duration.clone(),
            }
        };
        self.providers.favorites.save(&draft).await
    }

    /// # Errors
    ///
    /// [`RouteError::Provider`] when the store fails.
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteRecord>, RouteError> {
        self.providers.favorites.list().await
    }

    /// # Errors
    ///
    /// [`RouteError::Provider`] when the store fails or has no such id.
    pub async fn delete_favorite(&self, id: i64) -> Result<(), RouteError> {
        self.providers.favorites.delete(id).await
    }

    /// Fetches usage analytics and hands them to the renderer.
    ///
    /// # Errors
    ///
    /// [`RouteError::Provider`] when the aggregator fails.
    pub async fn load_analytics(&self) -> Result<AnalyticsSeries, RouteError> {
        let series = self.providers.analytics.analytics().await?;
        self.lock().renderer.render_analytics(&series);
        Ok(series)
    }

    /// Place-name suggestions for a partial query; blank input yields none.
    ///
    /// # Errors
    ///
    /// [`RouteError::Provider`] when the suggester fails.
    pub async fn suggest_places(&self, prefix: &str) -> Result<Vec<String>, RouteError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        self.providers.suggester.suggest(prefix).await
    }
}
