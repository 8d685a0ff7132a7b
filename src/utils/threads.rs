use futures::{StreamExt, stream};
use std::future::Future;

/// 以限定并发度执行一组Future，返回结果保持输入顺序
pub async fn do_parallel_with_limit<T, F>(futures: Vec<F>, max_parallels: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    stream::iter(futures)
        .buffered(max_parallels.max(1))
        .collect()
        .await
}
