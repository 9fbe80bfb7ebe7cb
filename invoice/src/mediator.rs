use crate::{Error, Event, EventHandler, Request, RequestHandler};
use log::warn;
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A mediator is the hub between the UI layer and the product list.
pub trait Mediator {
    /// Sends a request to the mediator.
    fn send<Req, Res>(&mut self, req: Req) -> crate::Result<Res>
    where
        Res: 'static,
        Req: Request<Res> + 'static;

    /// Publish an event to every subscriber, returns how many were notified.
    fn publish<E>(&mut self, event: E) -> usize
    where
        E: Event + 'static;
}

type SharedHandlers<H> = Rc<RefCell<HashMap<TypeId, H>>>;

// Handlers are stored type-erased and keyed by the `TypeId` of the request,
// the downcasts can only fail if a request type is registered with two responses.
#[derive(Clone)]
struct RequestHandlerWrapper {
    #[allow(clippy::type_complexity)]
    handler: Rc<RefCell<dyn FnMut(Box<dyn Any>) -> Option<Box<dyn Any>>>>,
}

impl RequestHandlerWrapper {
    fn new<Req, Res, H>(mut handler: H) -> Self
    where
        Res: 'static,
        Req: Request<Res> + 'static,
        H: RequestHandler<Req, Res> + 'static,
    {
        Self::from_fn::<Req, Res, _>(move |req: Req| handler.handle(req))
    }

    fn from_fn<Req, Res, F>(mut handler: F) -> Self
    where
        Res: 'static,
        Req: Request<Res> + 'static,
        F: FnMut(Req) -> Res + 'static,
    {
        let f = move |req: Box<dyn Any>| -> Option<Box<dyn Any>> {
            let req = req.downcast::<Req>().ok()?;
            Some(Box::new(handler(*req)))
        };

        RequestHandlerWrapper {
            handler: Rc::new(RefCell::new(f)),
        }
    }

    fn handle<Req, Res>(&self, req: Req) -> crate::Result<Res>
    where
        Res: 'static,
        Req: Request<Res> + 'static,
    {
        let mut handler = self
            .handler
            .try_borrow_mut()
            .map_err(|_| Error::HandlerBusy(type_name::<Req>()))?;

        (&mut *handler)(Box::new(req))
            .and_then(|res| res.downcast::<Res>().ok())
            .map(|res| *res)
            .ok_or(Error::NotFound(type_name::<Req>()))
    }
}

#[derive(Clone)]
struct EventHandlerWrapper {
    #[allow(clippy::type_complexity)]
    handler: Rc<RefCell<dyn FnMut(&dyn Any)>>,
}

impl EventHandlerWrapper {
    fn new<E, H>(mut handler: H) -> Self
    where
        E: Event + 'static,
        H: EventHandler<E> + 'static,
    {
        let f = move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                handler.handle(event.clone());
            }
        };

        EventHandlerWrapper {
            handler: Rc::new(RefCell::new(f)),
        }
    }

    fn handle<E>(&self, event: &E) -> bool
    where
        E: Event + 'static,
    {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => {
                (&mut *handler)(event as &dyn Any);
                true
            }
            Err(_) => {
                warn!(
                    "Subscriber of {} is already running, event skipped",
                    type_name::<E>()
                );
                false
            }
        }
    }
}

/// A single-threaded implementation of the [Mediator] trait.
///
/// Clones share the same handlers, so a handler can keep a clone to publish events.
///
/// # Examples
/// ```
/// use invoice::{DefaultMediator, Event, Mediator, Request, RequestHandler};
///
/// struct CountProducts(Vec<&'static str>);
/// impl Request<usize> for CountProducts {}
///
/// #[derive(Clone)]
/// struct Counted(usize);
/// impl Event for Counted {}
///
/// struct CountProductsHandler(DefaultMediator);
/// impl RequestHandler<CountProducts, usize> for CountProductsHandler {
///     fn handle(&mut self, req: CountProducts) -> usize {
///         self.0.publish(Counted(req.0.len()));
///         req.0.len()
///     }
/// }
///
/// let mut mediator = DefaultMediator::builder()
///     .add_handler_deferred(CountProductsHandler)
///     .subscribe_fn(|event: Counted| println!("{} products", event.0))
///     .build();
///
/// assert_eq!(2, mediator.send(CountProducts(vec!["Chair", "Table"])).unwrap());
/// ```
#[derive(Clone)]
pub struct DefaultMediator {
    request_handlers: SharedHandlers<RequestHandlerWrapper>,
    event_handlers: SharedHandlers<Vec<EventHandlerWrapper>>,
}

impl DefaultMediator {
    /// Gets a [DefaultMediator] builder.
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl Mediator for DefaultMediator {
    fn send<Req, Res>(&mut self, req: Req) -> crate::Result<Res>
    where
        Res: 'static,
        Req: Request<Res> + 'static,
    {
        // Released before the handler runs, handlers may send requests themselves.
        let handler = self
            .request_handlers
            .borrow()
            .get(&TypeId::of::<Req>())
            .cloned();

        match handler {
            Some(handler) => handler.handle(req),
            None => Err(Error::NotFound(type_name::<Req>())),
        }
    }

    fn publish<E>(&mut self, event: E) -> usize
    where
        E: Event + 'static,
    {
        let handlers = self
            .event_handlers
            .borrow()
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        let mut notified = 0;
        for handler in &handlers {
            if handler.handle(&event) {
                notified += 1;
            }
        }
        notified
    }
}

/// A builder for the [DefaultMediator].
pub struct Builder {
    inner: DefaultMediator,
}

impl Builder {
    /// Constructs a new `Builder`.
    pub fn new() -> Self {
        Builder {
            inner: DefaultMediator {
                request_handlers: SharedHandlers::default(),
                event_handlers: SharedHandlers::default(),
            },
        }
    }

    /// Registers a request handler, replacing any handler of the same request.
    pub fn add_handler<Req, Res, H>(self, handler: H) -> Self
    where
        Res: 'static,
        Req: Request<Res> + 'static,
        H: RequestHandler<Req, Res> + 'static,
    {
        self.insert_handler::<Req>(RequestHandlerWrapper::new(handler))
    }

    /// Registers a request handler from a function.
    pub fn add_handler_fn<Req, Res, F>(self, handler: F) -> Self
    where
        Res: 'static,
        Req: Request<Res> + 'static,
        F: FnMut(Req) -> Res + 'static,
    {
        self.insert_handler::<Req>(RequestHandlerWrapper::from_fn::<Req, Res, F>(handler))
    }

    /// Registers a request handler built with a copy of the mediator.
    pub fn add_handler_deferred<Req, Res, H, F>(self, f: F) -> Self
    where
        Res: 'static,
        Req: Request<Res> + 'static,
        H: RequestHandler<Req, Res> + 'static,
        F: FnOnce(DefaultMediator) -> H,
    {
        let handler = f(self.inner.clone());
        self.add_handler(handler)
    }

    fn insert_handler<Req: 'static>(self, wrapper: RequestHandlerWrapper) -> Self {
        self.inner
            .request_handlers
            .borrow_mut()
            .insert(TypeId::of::<Req>(), wrapper);
        self
    }

    /// Registers an event handler.
    pub fn subscribe<E, H>(self, handler: H) -> Self
    where
        E: Event + 'static,
        H: EventHandler<E> + 'static,
    {
        self.inner
            .event_handlers
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(EventHandlerWrapper::new(handler));
        self
    }

    /// Registers an event handler from a function.
    pub fn subscribe_fn<E, F>(self, handler: F) -> Self
    where
        E: Event + 'static,
        F: FnMut(E) + 'static,
    {
        self.subscribe(handler)
    }

    /// Builds the `DefaultMediator`.
    pub fn build(self) -> DefaultMediator {
        self.inner
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
