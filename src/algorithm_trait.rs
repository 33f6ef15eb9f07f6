/// The [`Algorithm`] trait is implemented by types that are intended to represent a computation
/// of a single "result".
///
/// In that sense, they are similar to futures or other asynchronous computation mechanisms.
/// However, the computation is split into explicit steps, so that the caller can inspect
/// the intermediate state, interleave multiple computations, or give up after a while.
///
/// ## Implementation comments
///  - Each algorithm object should be relatively simple and *do a single thing*. Prefer
///    composition of algorithms instead of building complicated state machines.
///  - Do not overuse the pattern for trivial computations. The main "reason" for using an
///    [`Algorithm`] instead of a simple function is that several computations
///    need to be interleaved, or that the intermediate state is useful on its own.
///  - All configuration must come as part of the initial state object.
pub trait Algorithm {
    type State;
    type Output;
    type Error;

    /// Create a new instance of [`Algorithm`] from an initial state object.
    fn create(initial_state: Self::State) -> Self
    where
        Self: Sized;

    /// Advance this instance of [`Algorithm`] by "one computation step".
    ///
    /// If the algorithm has finished computing, this method should always return a fresh instance
    /// of the final result. However, it is also allowed to perform some computation to verify
    /// this is indeed the final result, so don't treat algorithm objects as storage.
    fn advance(&mut self) -> Result<Option<Self::Output>, Self::Error>;

    /// Run this instance of [`Algorithm`] until completion by repeatedly
    /// calling [`Self::advance`].
    fn run(&mut self) -> Result<Self::Output, Self::Error> {
        loop {
            if let Some(output) = self.advance()? {
                return Ok(output);
            }
        }
    }

    /// Run this algorithm as a single ongoing computation.
    fn compute(initial_state: Self::State) -> Result<Self::Output, Self::Error>
    where
        Self: Sized,
    {
        Self::create(initial_state).run()
    }
}
