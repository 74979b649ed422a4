use crate::model::{ApiError, ApiMessageType, ApiResponse, ApiStatusCode, StatusCode};
use crate::pagination::{PaginationRequest, PaginationResult};
use celerik_core::localization::format_resource;
use celerik_core::{
    Configuration, CoreResult, Described, Logger, Mapper, ServiceArgs, ServiceRegistry, ServiceResources,
    StringLocalizer,
};
use celerik_validation::{BoxedValidator, Validator};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// A timed operation opened by [`ApiService::start_log`]
#[derive(Debug)]
#[must_use = "pass the guard to ApiService::end_log"]
pub struct OperationLog {
    operation: String,
    started: Instant,
}

impl OperationLog {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

/// First failure reported while validating a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPayload {
    pub message: String,
    /// Offending property, `None` when the payload itself is missing
    pub property: Option<String>,
}

/// Base for business services
///
/// `L` is the logger category and `R` names the resource file the service
/// localizes its messages from.
pub struct ApiService<L, R = L> {
    args: ServiceArgs<L>,
    localizer: StringLocalizer,
    resources: PhantomData<fn() -> R>,
}

impl<L: 'static, R: 'static> ApiService<L, R> {
    pub fn new(args: ServiceArgs<L>) -> CoreResult<Self> {
        let localizer = args.localizer_factory.create_for::<R>()?;
        Ok(Self {
            args,
            localizer,
            resources: PhantomData,
        })
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.args.services
    }

    pub fn config(&self) -> &Configuration {
        &self.args.config
    }

    pub fn logger(&self) -> &Logger {
        &self.args.logger
    }

    pub fn mapper(&self) -> &Mapper {
        &self.args.mapper
    }

    pub fn start_log(&self, operation: impl Into<String>) -> OperationLog {
        let operation = operation.into();
        self.logger()
            .debug(&self.localize("ApiService.StartLog.Start", &[&operation]));
        OperationLog {
            operation,
            started: Instant::now(),
        }
    }

    /// Close `log`, reporting the elapsed seconds and an optional message
    pub fn end_log(&self, log: OperationLog, message: Option<&str>) {
        let seconds = log.elapsed_seconds();
        self.logger()
            .debug(&self.localize("ApiService.EndLog.End", &[&log.operation]));
        self.logger()
            .debug(&self.localize("ApiService.EndLog.TotalSeconds", &[&seconds]));

        if let Some(message) = message.filter(|message| !message.is_empty()) {
            self.logger().debug(&self.localize(message, &[]));
        }
    }

    /// Resource `name` from this service's resources, else the built-in ones
    pub fn localize(&self, name: &str, args: &[&dyn Display]) -> String {
        self.localizer.localize(name, args)
    }

    /// Run the validator registered for `T`
    ///
    /// Returns the first failure, or `None` when the payload is valid. A
    /// missing payload is a failure without a property; a missing
    /// validator registration is an error.
    pub async fn validate<T>(&self, payload: Option<&T>) -> CoreResult<Option<InvalidPayload>>
    where
        T: Sync + 'static,
    {
        let Some(payload) = payload else {
            return Ok(Some(InvalidPayload {
                message: self.localize("ArgumentCanNotBeNull", &[&"payload"]),
                property: None,
            }));
        };

        let validator = self.services().resolve::<BoxedValidator<T>>()?;
        let failure = match validator.validate(payload).await {
            Ok(()) => None,
            Err(errors) => errors.first().map(|error| InvalidPayload {
                message: error.message.clone(),
                property: Some(error.field.clone()),
            }),
        };
        Ok(failure)
    }

    /// Error for an invalid payload
    ///
    /// Without a property the status is the one described `BadRequest`;
    /// with one it is the status described `{property}Format`, falling back
    /// to `BadRequest` and then to the default status.
    pub fn error_for<S: StatusCode>(&self, message: &str, property: Option<&str>) -> ApiError<S> {
        let bad_request = ApiStatusCode::BadRequest.description();
        let status = property
            .map(|property| format_resource(ApiStatusCode::Format.description(), &[&property]))
            .and_then(|description| S::from_description(&description))
            .or_else(|| S::from_description(bad_request))
            .unwrap_or_default();

        self.warn(ApiError::new(self.localize(message, &[]), status))
    }

    /// Error whose message is the localized name of `status`
    pub fn error<S: StatusCode>(&self, status: S) -> ApiError<S> {
        self.warn(ApiError::new(self.localize(status.name(), &[]), status))
    }

    /// Error for the first failure of [`validate`](Self::validate)
    pub fn invalid<S: StatusCode>(&self, failure: &InvalidPayload) -> ApiError<S> {
        self.error_for(&failure.message, failure.property.as_deref())
    }

    /// Successful response carrying `data` mapped to `D`
    pub fn ok<D, Src, S>(&self, data: &Src, status: S) -> CoreResult<ApiResponse<D, S>>
    where
        D: 'static,
        Src: Clone + 'static,
        S: StatusCode,
    {
        let data = self.mapper().map_or_clone::<Src, D>(data)?;
        Ok(ApiResponse::success(data, Some(self.localize(status.name(), &[])), status))
    }

    /// Normalize a response produced elsewhere
    ///
    /// A response with data becomes a success with `success_status`; one
    /// without becomes a failure keeping its status, and gets the localized
    /// status name as message when it has none.
    pub fn process_response<D, S: StatusCode>(&self, response: &mut ApiResponse<D, S>, success_status: S) {
        if response.data.is_some() {
            response.success = true;
            response.message = Some(self.localize(success_status.name(), &[]));
            response.message_type = Some(ApiMessageType::Success);
            response.status_code = success_status;
        } else {
            response.success = false;
            response.message_type = Some(ApiMessageType::Error);
            if response.message.is_none() {
                response.message = Some(self.localize(response.status_code.name(), &[]));
            }
        }
    }

    /// Page of `items` mapped to `D`
    ///
    /// An empty record set is still a success, with an informational
    /// message instead of the `Ok` one.
    pub fn paginate<E, D>(
        &self,
        request: &PaginationRequest,
        items: &[E],
        record_count: u64,
    ) -> CoreResult<ApiResponse<PaginationResult<D>>>
    where
        E: Clone + 'static,
        D: 'static,
    {
        let mapped = items
            .iter()
            .map(|item| self.mapper().map_or_clone::<E, D>(item))
            .collect::<CoreResult<Vec<D>>>()?;
        let page = PaginationResult::new(request, mapped, record_count);

        if record_count == 0 {
            let message = ServiceResources::get("Common.NoRecordsFound", &[]);
            let mut response = ApiResponse::success(page, Some(message), ApiStatusCode::Ok);
            response.message_type = Some(ApiMessageType::Info);
            return Ok(response);
        }

        Ok(ApiResponse::success(page, Some(self.localize(ApiStatusCode::Ok.name(), &[])), ApiStatusCode::Ok))
    }

    fn warn<S>(&self, error: ApiError<S>) -> ApiError<S> {
        self.logger().warn(&error.message);
        error
    }
}

impl<L, R> Drop for ApiService<L, R> {
    fn drop(&mut self) {
        let name = std::any::type_name::<R>().rsplit("::").next().unwrap_or_default();
        self.args
            .logger
            .debug(&self.localizer.localize("ApiService.Dispose.Disposing", &[&name]));
    }
}

impl<L, R> std::fmt::Debug for ApiService<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("args", &self.args)
            .field("resources", &self.localizer.base_name())
            .finish()
    }
}

/// Build a service from the arguments bundle registered for `L`
pub fn resolve_service<L: 'static, R: 'static>(services: &ServiceRegistry) -> CoreResult<ApiService<L, R>> {
    let args: Arc<ServiceArgs<L>> = services.resolve::<ServiceArgs<L>>()?;
    ApiService::new((*args).clone())
}
