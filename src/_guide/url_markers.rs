/*!

# Marking the Addressable Part of a URL

[`bad_urls`][crate::mutators::bad_urls] corrupts path segments and query
values. Often part of the path is fixed by the deployment, such as an API
prefix, and corrupting it only produces uninteresting `404`s. Put a `;` where
the addressable part starts and everything before it is kept verbatim:

```
use badbatch::{mutators as m, Corrupt};

let urls = m::bad_urls().corrupt("https://h.org/api/v1;/users/42")?;

assert_eq!(
    urls,
    [
        "https://h.org/api/v1/aaaaa/42",
        "https://h.org/api/v1/users/00",
        "https://h.org/api/v1/aaaaa/00",
    ]
);
# Ok::<(), badbatch::Error>(())
```

The marker is removed from every emitted URL, and from the good request of a
[batch][crate::generate_batch].

Without a marker the URL must be absolute: it is parsed and everything after
its origin is addressable.

Query parameters are grouped by name, so repeated parameters are corrupted
independently and emitted in their original order. Disable query corruption
with [`corrupt_query_params(false)`][crate::mutators::BadUrls::corrupt_query_params]
to keep the baseline query on every URL.

 */
