pub mod annotation;
pub mod delegate;
pub mod pool;
pub mod reconciler;
pub mod view;

pub use annotation::{Annotation, AnnotationId};
pub use delegate::{AnnotationViewProvider, Delegate, ReuseIdentifierProvider};
pub use pool::ViewPool;
pub use reconciler::{Hooks, ReconcileReport, Reconciler};
pub use view::{AnnotationView, ViewId};
