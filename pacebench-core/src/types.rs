//! Type-Tag Arguments
//!
//! Benchmarks can be parameterized over types instead of values. A tuple of
//! types is a [`TypeList`]; a [`TypedBench`] is invoked once per type in it.

use crate::context::Context;

/// A benchmark body that is generic over its argument type.
///
/// ```ignore
/// struct PushBack;
///
/// impl TypedBench for PushBack {
///     fn run<T: 'static>(&mut self, ctx: &mut Context) {
///         while ctx.advance() {
///             do_not_optimize(Vec::<T>::with_capacity(64));
///         }
///     }
/// }
/// ```
pub trait TypedBench {
    /// Run the benchmark body for type `T`
    fn run<T: 'static>(&mut self, ctx: &mut Context);
}

/// Callback invoked once per type of a [`TypeList`]
pub trait TypeVisitor {
    /// Visit type `T`
    fn visit<T: 'static>(&mut self);
}

/// An ordered list of types, implemented for tuples of up to twelve types.
pub trait TypeList {
    /// Number of types in the list
    const LEN: usize;

    /// Call `visitor.visit::<T>()` for each type, in order
    fn for_each<V: TypeVisitor>(visitor: &mut V);
}

macro_rules! impl_type_list {
    ($len:expr; $($ty:ident),+) => {
        impl<$($ty: 'static),+> TypeList for ($($ty,)+) {
            const LEN: usize = $len;

            fn for_each<V: TypeVisitor>(visitor: &mut V) {
                $(visitor.visit::<$ty>();)+
            }
        }
    };
}

impl_type_list!(1; A);
impl_type_list!(2; A, B);
impl_type_list!(3; A, B, C);
impl_type_list!(4; A, B, C, D);
impl_type_list!(5; A, B, C, D, E);
impl_type_list!(6; A, B, C, D, E, F);
impl_type_list!(7; A, B, C, D, E, F, G);
impl_type_list!(8; A, B, C, D, E, F, G, H);
impl_type_list!(9; A, B, C, D, E, F, G, H, I);
impl_type_list!(10; A, B, C, D, E, F, G, H, I, J);
impl_type_list!(11; A, B, C, D, E, F, G, H, I, J, K);
impl_type_list!(12; A, B, C, D, E, F, G, H, I, J, K, L);

/// Display name of a type tag.
///
/// Module paths are stripped for plain paths (`my_crate::Point` → `Point`);
/// generic and compound types keep the full `std::any::type_name` text.
pub fn type_label<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains(['<', '(', '[', '&', ' ']) {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
