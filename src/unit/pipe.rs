//! The pipe unit abstraction.
//!
//! A pipe unit wraps a transformation whose first parameter is the incoming
//! value. Units are immutable and applied by shared reference, so one unit
//! can be applied any number of times to independent inputs.

/// A transformation that can be applied to an input flowing through a pipeline.
///
/// Applying a unit either returns a lazy iterator (the pipeline continues) or
/// an eager value (the pipeline ends). The unit itself carries no state tied
/// to any particular input.
///
/// # Examples
///
/// ```
/// use pipette::unit::{PipeUnit, unit};
///
/// let double_all = unit(|values: Vec<i32>| values.into_iter().map(|value| value * 2).collect::<Vec<_>>());
/// assert_eq!(double_all.apply(vec![1, 2, 3]), vec![2, 4, 6]);
/// assert_eq!(double_all.apply(vec![5]), vec![10]);
/// ```
pub trait PipeUnit<Input> {
    /// What applying the unit produces.
    type Output;

    /// Applies the unit to `input`.
    fn apply(&self, input: Input) -> Self::Output;
}

impl<Input, U> PipeUnit<Input> for &U
where
    U: PipeUnit<Input> + ?Sized,
{
    type Output = U::Output;

    #[inline]
    fn apply(&self, input: Input) -> Self::Output {
        (**self).apply(input)
    }
}

/// A pipe unit built from a function.
///
/// `Pipe<F>` is a unit whenever `F: Fn(Input) -> Output`. When `F` takes a
/// second argument, the pipe is a *parameterized* unit that must be curried
/// with [`Pipe::curry`] before it can be applied.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let halve = Pipe::new(|value: f64| value / 2.0);
/// assert_eq!(10.0_f64.pipe(&halve), 5.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pipe<F> {
    function: F,
}

impl<F> Pipe<F> {
    /// Wraps `function` without constraining its signature.
    #[inline]
    pub const fn new(function: F) -> Self {
        Self { function }
    }

    /// Unwraps the inner function.
    #[inline]
    pub fn into_inner(self) -> F {
        self.function
    }

    /// Captures `arguments` and returns a unit that only waits for the input.
    ///
    /// `pipe.curry(arguments)` applied to `input` evaluates
    /// `function(input, &arguments)`. Currying leaves `self` untouched and
    /// can be repeated with different arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let clamp = parameterized(|value: i32, (low, high): &(i32, i32)| value.clamp(*low, *high));
    ///
    /// let percent = clamp.curry((0, 100));
    /// let byte = clamp.curry((0, 255));
    ///
    /// assert_eq!(300_i32.pipe(&percent), 100);
    /// assert_eq!(300_i32.pipe(&byte), 255);
    /// ```
    #[inline]
    pub fn curry<Arguments>(&self, arguments: Arguments) -> Curried<F, Arguments>
    where
        F: Clone,
    {
        Curried {
            function: self.function.clone(),
            arguments,
        }
    }
}

impl<Input, Output, F> PipeUnit<Input> for Pipe<F>
where
    F: Fn(Input) -> Output,
{
    type Output = Output;

    #[inline]
    fn apply(&self, input: Input) -> Output {
        (self.function)(input)
    }
}

/// A parameterized pipe with its parameters captured.
///
/// Produced by [`Pipe::curry`]; usable anywhere a unit is expected.
#[derive(Debug, Clone)]
pub struct Curried<F, Arguments> {
    function: F,
    arguments: Arguments,
}

impl<F, Arguments> Curried<F, Arguments> {
    /// The captured arguments.
    pub const fn arguments(&self) -> &Arguments {
        &self.arguments
    }
}

impl<Input, Output, F, Arguments> PipeUnit<Input> for Curried<F, Arguments>
where
    F: Fn(Input, &Arguments) -> Output,
{
    type Output = Output;

    #[inline]
    fn apply(&self, input: Input) -> Output {
        (self.function)(input, &self.arguments)
    }
}

/// Wraps a one-argument function into a unit.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let shout = unit(|text: &str| text.to_uppercase());
/// assert_eq!("hello".pipe(&shout), "HELLO");
/// ```
#[inline]
pub const fn unit<Input, Output, F>(function: F) -> Pipe<F>
where
    F: Fn(Input) -> Output,
{
    Pipe::new(function)
}

/// Wraps a function taking the input plus a parameter bundle.
///
/// The result must be curried with [`Pipe::curry`] before application.
/// Several parameters are passed as a tuple.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let scale = parameterized(|values: Vec<i32>, factor: &i32| {
///     values.into_iter().map(|value| value * factor).collect::<Vec<_>>()
/// });
/// assert_eq!(vec![1, 2].pipe(scale.curry(3)), vec![3, 6]);
/// ```
#[inline]
pub const fn parameterized<Input, Arguments, Output, F>(function: F) -> Pipe<F>
where
    F: Fn(Input, &Arguments) -> Output,
{
    Pipe::new(function)
}
