//! Console sinks.

use std::fmt::Display;
use std::iter::Inspect;

use crate::unit::{PipeUnit, nullary_unit};

nullary_unit! {
    /// Writes the stringified input to standard output, without a newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// (1..=3).pipe(concat()).pipe(stdout());
    /// ```
    Stdout
}

impl<T: Display> PipeUnit<T> for Stdout {
    type Output = ();

    fn apply(&self, input: T) -> Self::Output {
        print!("{input}");
    }
}

nullary_unit! {
    /// Writes the stringified input to standard output, followed by a
    /// newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// vec![1, 2].pipe(sum()).pipe(lineout());
    /// ```
    #[doc(alias = "print")]
    Lineout
}

impl<T: Display> PipeUnit<T> for Lineout {
    type Output = ();

    fn apply(&self, input: T) -> Self::Output {
        println!("{input}");
    }
}

nullary_unit! {
    /// Prints each item on its own line as it passes through, yielding it
    /// unchanged.
    ///
    /// Nothing is printed until the output is iterated, and items are
    /// printed one at a time as they are pulled.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let total = (1..=3).pipe(tee()).pipe(sum());
    /// assert_eq!(total, 6);
    /// ```
    Tee
}

fn print_line<T: Display>(item: &T) {
    println!("{item}");
}

impl<I> PipeUnit<I> for Tee
where
    I: IntoIterator,
    I::Item: Display,
{
    type Output = Inspect<I::IntoIter, fn(&I::Item)>;

    fn apply(&self, input: I) -> Self::Output {
        input
            .into_iter()
            .inspect(print_line::<I::Item> as fn(&I::Item))
    }
}
