mod invocation;
mod product;

pub use invocation::ProcessInvocation;
pub use product::ProductIdentity;
